pub mod printer_settings;

pub use printer_settings::PrinterSettings;
