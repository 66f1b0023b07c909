use eventspout_application::DispatchService;

/// Shared bridge state.
#[derive(Clone)]
pub struct BridgeState {
    pub dispatch_service: DispatchService,
}
