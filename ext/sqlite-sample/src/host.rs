///
/// Registration sink: the host side of the load contract.
///
/// `FunctionHost` is the only route by which the extension touches a host's
/// function catalog. `rusqlite::Connection` implements it directly; other
/// hosts (embedders with their own catalog, test doubles) implement the same
/// two operations.
///

use rusqlite::Connection;
use rusqlite::types::ValueRef;

use crate::errors::HostError;
use crate::function::{Evaluation, FunctionDescriptor};

pub trait FunctionHost {
    /// Add a function to the catalog. The host owns the descriptor's
    /// metadata from here on.
    fn register_function(&mut self, descriptor: &FunctionDescriptor) -> Result<(), HostError>;

    /// Remove the function registered under `name` with `arity` arguments.
    fn unregister_function(&mut self, name: &str, arity: i32) -> Result<(), HostError>;
}

impl FunctionHost for Connection {
    fn register_function(&mut self, descriptor: &FunctionDescriptor) -> Result<(), HostError> {
        let callback = descriptor.callback;

        self.create_scalar_function(descriptor.name, descriptor.arity, descriptor.flags, move |ctx| {
            let args: Vec<ValueRef<'_>> = (0..ctx.len()).map(|idx| ctx.get_raw(idx)).collect();
            match Evaluation::run(callback, &args) {
                Ok(value) => Ok(value.into_sql_output()),
                Err(message) => Err(rusqlite::Error::UserFunctionError(message.into())),
            }
        })?;

        Ok(())
    }

    fn unregister_function(&mut self, name: &str, arity: i32) -> Result<(), HostError> {
        Connection::remove_function(self, name, arity)?;
        Ok(())
    }
}
