use alloc::sync::Arc;
use core::time::Duration;

use ibc_core::client::types::Height;
use ibc_core::port::PortKeeper;
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Timestamp;
use parking_lot::Mutex;
use typed_builder::TypedBuilder;

use crate::testapp::ibc::core::types::{MockContext, MockIbcStore, DEFAULT_BLOCK_TIME_SECS};
use crate::utils::year_2023;

/// Configuration of the `MockContext` type for generating dummy contexts.
#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = MockContext))]
pub struct MockContextConfig {
    #[builder(default = Duration::from_secs(DEFAULT_BLOCK_TIME_SECS))]
    block_time: Duration,

    #[builder(default = year_2023())]
    latest_timestamp: Timestamp,

    #[builder(default = Height::new(0, 5).expect("Never fails"))]
    latest_height: Height,
}

impl From<MockContextConfig> for MockContext {
    fn from(params: MockContextConfig) -> Self {
        MockContext {
            latest_height: params.latest_height,
            latest_timestamp: params.latest_timestamp,
            block_time: params.block_time,
            port_keeper: PortKeeper::new(),
            clients: BTreeMap::new(),
            ibc_store: Arc::new(Mutex::new(MockIbcStore::default())),
        }
    }
}
