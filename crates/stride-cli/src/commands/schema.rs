use anyhow::Context;
use stride_schema::registry::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `stride schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    if args.list {
        return output(&registry.list(), flags.format);
    }
    match args.name.as_deref() {
        Some(name) => {
            let schema = registry
                .get(name)
                .with_context(|| format!("unknown schema '{name}'; see `stride schema --list`"))?;
            output(schema, flags.format)
        }
        None => {
            print!("{}", stride_schema::schema_sdl());
            Ok(())
        }
    }
}
