use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;

use crate::action::CreateDeviceType;
use crate::proxy::config::ProxyConfig;
use crate::proxy::endpoint::ProxyEndpoint;

pub struct ProxyStateBuilder<MandatoryFields = CreateDeviceType> {
    config: ProxyConfig,
    mandatory_fields: MandatoryFields,
}

impl ProxyStateBuilder {
    pub fn build(self) -> ProxyState {
        ProxyState {
            inner: Arc::new(Inner {
                config: self.config,
                action: self.mandatory_fields,
            }),
        }
    }
}

impl ProxyStateBuilder<()> {
    pub fn with_action(self, action: CreateDeviceType) -> ProxyStateBuilder<CreateDeviceType> {
        ProxyStateBuilder {
            config: self.config,
            mandatory_fields: action,
        }
    }
}

impl<T> ProxyStateBuilder<T> {
    pub fn with_config(self, config: ProxyConfig) -> ProxyStateBuilder<T> {
        ProxyStateBuilder { config, ..self }
    }
}

#[derive(Clone)]
#[repr(transparent)]
pub struct ProxyState {
    inner: Arc<Inner>,
}

impl ProxyState {
    pub fn builder() -> ProxyStateBuilder<()> {
        ProxyStateBuilder {
            config: ProxyConfig::default(),
            mandatory_fields: (),
        }
    }

    pub async fn bind_socket(&self) -> std::io::Result<TcpListener> {
        TcpListener::bind(self.config().listen_addr).await
    }

    pub async fn bind_endpoint(&self) -> Result<ProxyEndpoint> {
        ProxyEndpoint::bind(self.clone()).await
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.inner.config
    }

    pub fn action(&self) -> &CreateDeviceType {
        &self.inner.action
    }
}

struct Inner {
    config: ProxyConfig,
    action: CreateDeviceType,
}
