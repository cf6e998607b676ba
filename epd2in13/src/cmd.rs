//! SSD1680 command bytes used by the driver.

pub const DRIVER_OUTPUT_CONTROL: u8 = 0x01;
pub const DEEP_SLEEP: u8 = 0x10;
pub const DATA_ENTRY_MODE: u8 = 0x11;
pub const SW_RESET: u8 = 0x12;
pub const TEMPERATURE_SENSOR: u8 = 0x18;
pub const MASTER_ACTIVATION: u8 = 0x20;
pub const DISPLAY_UPDATE_CONTROL_1: u8 = 0x21;
pub const DISPLAY_UPDATE_CONTROL_2: u8 = 0x22;
pub const WRITE_RAM_BW: u8 = 0x24;
pub const BORDER_WAVEFORM: u8 = 0x3C;
pub const SET_RAM_X_RANGE: u8 = 0x44;
pub const SET_RAM_Y_RANGE: u8 = 0x45;
pub const SET_RAM_X_COUNTER: u8 = 0x4E;
pub const SET_RAM_Y_COUNTER: u8 = 0x4F;
