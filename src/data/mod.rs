pub mod connection;
pub mod payload;
pub mod sample_buffer;
pub mod sensor_panel;
