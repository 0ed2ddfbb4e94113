// Umbrella Buzz - BLE GATT Server
//
// Bluedroid bring-up: one primary service with the read/write control
// characteristic, advertised continuously. Writes are forwarded to the
// ControlWriteHandler, which queues patterns for the haptic task.

use std::sync::mpsc::SyncSender;
use std::sync::{Arc, Mutex, PoisonError};

use enumset::enum_set;
use esp_idf_svc::bt::ble::gap::{AdvConfiguration, BleGapEvent, EspBleGap};
use esp_idf_svc::bt::ble::gatt::server::{EspGatts, GattsEvent};
use esp_idf_svc::bt::ble::gatt::{
    AutoResponse, GattCharacteristic, GattId, GattInterface, GattServiceId, GattStatus, Handle,
    Permission, Property,
};
use esp_idf_svc::bt::{Ble, BtDriver, BtStatus, BtUuid};
use esp_idf_hal::modem::Modem;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::sys::EspError;

use umbrella_buzz::ble::ControlWriteHandler;
use umbrella_buzz::config::*;
use umbrella_buzz::events::Pattern;

type Driver = BtDriver<'static, Ble>;
type Gap = EspBleGap<'static, Ble, Arc<Driver>>;
type Gatts = EspGatts<'static, Ble, Arc<Driver>>;

pub struct ControlServer {
    gap: Gap,
    gatts: Gatts,
    writes: Mutex<ControlWriteHandler<SyncSender<Pattern>>>,
}

/// Bring up the BT controller and register the GATT application. Service
/// creation and advertising continue from the stack's event callbacks.
pub fn start(
    modem: Modem,
    nvs: EspDefaultNvsPartition,
    pattern_tx: SyncSender<Pattern>,
) -> anyhow::Result<Arc<ControlServer>> {
    let bt = Arc::new(BtDriver::new(modem, Some(nvs))?);

    let server = Arc::new(ControlServer {
        gap: EspBleGap::new(bt.clone())?,
        gatts: EspGatts::new(bt)?,
        writes: Mutex::new(ControlWriteHandler::new(pattern_tx)),
    });

    let gap_server = server.clone();
    server.gap.subscribe(move |event| {
        if let Err(e) = gap_server.on_gap_event(event) {
            log::error!("GAP event handling failed: {}", e);
        }
    })?;

    let gatts_server = server.clone();
    server.gatts.subscribe(move |(gatt_if, event)| {
        if let Err(e) = gatts_server.on_gatts_event(gatt_if, event) {
            log::error!("GATTS event handling failed: {}", e);
        }
    })?;

    server.gatts.register_app(BLE_APP_ID)?;
    log::info!("BLE GATT server registered");

    Ok(server)
}

impl ControlServer {
    fn on_gap_event(&self, event: BleGapEvent) -> Result<(), EspError> {
        if let BleGapEvent::AdvertisingConfigured(status) = event {
            if !matches!(status, BtStatus::Success) {
                log::error!("Advertising configuration failed: {:?}", status);
                return Ok(());
            }
            self.gap.start_advertising()?;
            log::info!("Characteristic defined! Now you can read it in your phone!");
        }
        Ok(())
    }

    fn on_gatts_event(&self, gatt_if: GattInterface, event: GattsEvent) -> Result<(), EspError> {
        match event {
            GattsEvent::ServiceRegistered { status, app_id } => {
                if !gatt_ok(status) || app_id != BLE_APP_ID {
                    return Ok(());
                }
                self.create_service(gatt_if)?;
            }
            GattsEvent::ServiceCreated {
                status,
                service_handle,
                ..
            } => {
                if gatt_ok(status) {
                    self.start_service(service_handle)?;
                }
            }
            GattsEvent::CharacteristicAdded {
                status,
                attr_handle,
                char_uuid,
                ..
            } => {
                if gatt_ok(status) && char_uuid == BtUuid::uuid128(CONTROL_CHAR_UUID) {
                    self.handler().bind(attr_handle);
                }
            }
            GattsEvent::PeerConnected { addr, .. } => {
                log::info!("Client connected: {}", addr);
            }
            GattsEvent::PeerDisconnected { addr, .. } => {
                log::info!("Client disconnected: {}", addr);
                self.gap.start_advertising()?;
            }
            GattsEvent::Write { handle, value, .. } => {
                // Responses are sent by the stack (AutoResponse::ByGatt).
                self.handler().on_write(handle, value);
            }
            _ => (),
        }
        Ok(())
    }

    fn create_service(&self, gatt_if: GattInterface) -> Result<(), EspError> {
        self.gap.set_device_name(BLE_DEVICE_NAME)?;
        self.gap.set_adv_conf(&AdvConfiguration {
            set_scan_rsp: true,
            include_name: true,
            include_txpower: true,
            ..Default::default()
        })?;
        self.gap.set_adv_conf(&AdvConfiguration {
            include_name: true,
            min_interval: ADV_MIN_INTERVAL_HINT,
            max_interval: ADV_MAX_INTERVAL_HINT,
            flag: 2,
            service_uuid: Some(BtUuid::uuid128(SERVICE_UUID)),
            ..Default::default()
        })?;

        self.gatts.create_service(
            gatt_if,
            &GattServiceId {
                id: GattId {
                    uuid: BtUuid::uuid128(SERVICE_UUID),
                    inst_id: 0,
                },
                is_primary: true,
            },
            SERVICE_NUM_HANDLES,
        )?;
        Ok(())
    }

    fn start_service(&self, service_handle: Handle) -> Result<(), EspError> {
        self.gatts.start_service(service_handle)?;
        self.gatts.add_characteristic(
            service_handle,
            &GattCharacteristic {
                uuid: BtUuid::uuid128(CONTROL_CHAR_UUID),
                permissions: enum_set!(Permission::Write | Permission::Read),
                properties: enum_set!(Property::Write | Property::Read),
                max_len: CONTROL_CHAR_MAX_LEN,
                auto_rsp: AutoResponse::ByGatt,
            },
            CONTROL_CHAR_INITIAL_VALUE,
        )?;
        Ok(())
    }

    fn handler(&self) -> std::sync::MutexGuard<'_, ControlWriteHandler<SyncSender<Pattern>>> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn gatt_ok(status: GattStatus) -> bool {
    if !matches!(status, GattStatus::Ok) {
        log::warn!("GATT status: {:?}", status);
        return false;
    }
    true
}
