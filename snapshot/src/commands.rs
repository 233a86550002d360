//! Command table: name → (description, flag schema, handler), built once at startup

use futures::future::{BoxFuture, FutureExt};
use std::collections::BTreeMap;
use tracing::debug;

use crate::constants::commands;
use crate::errors::{SnapshotError, ValidationError};
use crate::options::{FlagSpec, RawFlags, RESTORE_FLAGS, VERIFY_FLAGS};
use crate::orchestrator::{run_restore, run_verify, CommandContext};

pub type CommandHandler =
    for<'a> fn(&'a CommandContext, RawFlags) -> BoxFuture<'a, Result<(), SnapshotError>>;

#[derive(Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub flags: &'static [FlagSpec],
    pub handler: CommandHandler,
}

fn restore_handler(ctx: &CommandContext, raw: RawFlags) -> BoxFuture<'_, Result<(), SnapshotError>> {
    run_restore(ctx, raw).boxed()
}

fn verify_handler(ctx: &CommandContext, raw: RawFlags) -> BoxFuture<'_, Result<(), SnapshotError>> {
    run_verify(ctx, raw).boxed()
}

pub struct CommandTable {
    commands: BTreeMap<&'static str, CommandSpec>,
}

impl CommandTable {
    pub fn new() -> Self {
        let mut table = Self {
            commands: BTreeMap::new(),
        };
        table.register(CommandSpec {
            name: commands::RESTORE,
            description: commands::RESTORE_DESCRIPTION,
            flags: RESTORE_FLAGS,
            handler: restore_handler,
        });
        table.register(CommandSpec {
            name: commands::VERIFY,
            description: commands::VERIFY_DESCRIPTION,
            flags: VERIFY_FLAGS,
            handler: verify_handler,
        });
        table
    }

    fn register(&mut self, spec: CommandSpec) {
        self.commands.insert(spec.name, spec);
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    pub async fn dispatch(
        &self,
        name: &str,
        ctx: &CommandContext,
        raw: RawFlags,
    ) -> Result<(), SnapshotError> {
        let spec = self
            .get(name)
            .ok_or_else(|| ValidationError::UnknownCommand {
                name: name.to_string(),
            })?;
        debug!("Dispatching {} with flags {:?}", spec.name, raw.supplied());
        (spec.handler)(ctx, raw).await
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}
