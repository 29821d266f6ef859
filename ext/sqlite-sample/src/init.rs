///
/// # Extension Initialization
///
/// `initialize` runs the load sequence against any `FunctionHost`:
///
/// ```text
/// Start -> ApiChecked -> Registered(1) -> Registered(2) -> Done
///   \__________\_______________\_______________\________-> Failed(status)
/// ```
///
/// The first failing step ends the load and its status is returned verbatim.
/// What happens to functions registered before the failure is decided by
/// `FailurePolicy`:
/// - `KeepRegistered` (default): they stay in the host's catalog
/// - `Rollback`: they are removed again, newest first. If a removal fails the
///   load reports `ExtensionError::Rollback`, which still carries the
///   registration failure and its status
///

use std::fmt;

use tracing::{debug, info, warn};

use crate::api::{ApiSurface, ApiVersion, BoundApi, REQUIRED_API_VERSION};
use crate::errors::ExtensionError;
use crate::function::FunctionDescriptor;
use crate::host::FunctionHost;
use crate::registry::FUNCTIONS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    KeepRegistered,
    Rollback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    pub policy: FailurePolicy,
}

impl LoadOptions {
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    Start,
    ApiChecked,
    Registered(usize),
    Done,
    Failed(i32),
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::ApiChecked => write!(f, "api-checked"),
            Self::Registered(count) => write!(f, "registered({count})"),
            Self::Done => write!(f, "done"),
            Self::Failed(status) => write!(f, "failed({status})"),
        }
    }
}

/// Summary of a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub api_version: ApiVersion,
    pub registered: Vec<&'static str>,
    pub stage: LoadStage,
}

/// Bind `surface`, then register every entry of `FUNCTIONS` with `host`.
pub fn initialize<H>(
    host: &mut H,
    surface: &ApiSurface,
    options: &LoadOptions,
) -> Result<LoadReport, ExtensionError>
where
    H: FunctionHost + ?Sized,
{
    initialize_with(host, surface, options, &FUNCTIONS)
}

pub(crate) fn initialize_with<H>(
    host: &mut H,
    surface: &ApiSurface,
    options: &LoadOptions,
    functions: &'static [FunctionDescriptor],
) -> Result<LoadReport, ExtensionError>
where
    H: FunctionHost + ?Sized,
{
    let mut stage = LoadStage::Start;
    debug!(%stage, host_version = %surface.version(), "loading sqlite-sample");

    let mut api = match surface.bind(host, REQUIRED_API_VERSION) {
        Ok(api) => api,
        Err(err) => {
            stage = LoadStage::Failed(err.status());
            warn!(%stage, "{err}");
            return Err(err);
        }
    };
    stage = LoadStage::ApiChecked;
    debug!(%stage, "api surface bound");

    let mut registered = Vec::with_capacity(functions.len());
    for descriptor in functions {
        if let Err(source) = api.register(descriptor) {
            let err = ExtensionError::Registration {
                name: descriptor.name,
                arity: descriptor.arity,
                source,
            };
            stage = LoadStage::Failed(err.status());
            warn!(%stage, "{err}");

            if options.policy == FailurePolicy::Rollback {
                return rollback(&mut api, functions, registered.len(), err);
            }
            return Err(err);
        }

        registered.push(descriptor.name);
        stage = LoadStage::Registered(registered.len());
        debug!(%stage, function = descriptor.name, arity = descriptor.arity, "registered");
    }

    stage = LoadStage::Done;
    info!(%stage, functions = registered.len(), "sqlite-sample loaded");

    Ok(LoadReport {
        api_version: api.version(),
        registered,
        stage,
    })
}

/// Remove the first `count` descriptors again, newest first, then fail with
/// `cause`. Every removal is attempted; the first one the host refuses is
/// reported as `ExtensionError::Rollback` wrapping `cause`.
fn rollback<H>(
    api: &mut BoundApi<'_, H>,
    functions: &'static [FunctionDescriptor],
    count: usize,
    cause: ExtensionError,
) -> Result<LoadReport, ExtensionError>
where
    H: FunctionHost + ?Sized,
{
    let mut refused = None;
    for descriptor in functions[..count].iter().rev() {
        match api.unregister(descriptor) {
            Ok(()) => debug!(function = descriptor.name, "rolled back"),
            Err(source) => {
                warn!(function = descriptor.name, "rollback failed: {source}");
                if refused.is_none() {
                    refused = Some((descriptor, source));
                }
            }
        }
    }

    match refused {
        None => Err(cause),
        Some((descriptor, source)) => Err(ExtensionError::Rollback {
            name: descriptor.name,
            arity: descriptor.arity,
            source,
            cause: Box::new(cause),
        }),
    }
}
