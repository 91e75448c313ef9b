pub mod file_data_adapter;
pub mod file_config_adapter;
