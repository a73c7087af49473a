use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Task(args) => commands::resolve::task(&args, ctx, flags).await,
        Commands::Tasks => commands::resolve::tasks(ctx, flags).await,
        Commands::Product { slug } => commands::resolve::product(&slug, ctx, flags).await,
        Commands::Initiative(args) => commands::resolve::initiative(&args, ctx, flags).await,
        Commands::Capability(args) => commands::resolve::capability(&args, ctx, flags).await,
        Commands::Breadcrumb { id } => commands::resolve::breadcrumb(id, ctx, flags).await,
        Commands::Create(args) => commands::create::handle(&args, ctx, flags).await,
        Commands::Person {
            username,
            first_name,
        } => commands::admin::person(&username, first_name.as_deref(), ctx, flags).await,
        Commands::Grant {
            product,
            username,
            right,
        } => commands::admin::grant(&product, &username, right, ctx, flags).await,
        Commands::Claim {
            task,
            username,
            kind,
        } => commands::admin::claim(task, &username, kind, ctx, flags).await,
        Commands::Schema(_) => anyhow::bail!("schema is handled before the store is opened"),
    }
}
