pub mod generate;
pub mod review;
pub mod init_config;
