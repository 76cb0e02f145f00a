//! The `refimage migrate` command: upgrade serialized setting values.

use clap::Args;

use refimage_core::{migrate_settings, SettingsOrigin};

/// Arguments for the `migrate` command.
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Revision the values currently conform to
    #[arg(long)]
    revision: u32,

    /// Treat the values as an import from the predecessor tool
    #[arg(long)]
    legacy: bool,

    /// The flat setting values, in pipeline-file order
    #[arg(allow_hyphen_values = true)]
    values: Vec<String>,
}

/// Execute the migrate command.
pub fn execute(args: MigrateArgs) -> anyhow::Result<()> {
    let origin = if args.legacy {
        SettingsOrigin::Legacy
    } else {
        SettingsOrigin::Native
    };

    let (values, revision, _) = migrate_settings(args.values, args.revision, origin)?;
    tracing::debug!("Migrated to revision {revision}");
    for value in &values {
        println!("{value}");
    }
    Ok(())
}
