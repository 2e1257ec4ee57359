use serde::{Deserialize, Serialize};
use wiotp_utils::logger::LoggerConfig;

use crate::params::ParamsConfig;
use crate::platform::PlatformConfig;
use crate::proxy::ProxyConfig;

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub platform: PlatformConfig,

    pub params: ParamsConfig,

    pub proxy: ProxyConfig,

    pub logger: LoggerConfig,
}
