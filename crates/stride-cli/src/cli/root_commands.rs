use clap::{Args, Subcommand, ValueEnum};

/// Top-level commands.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Resolve a task by id.
    Task(TaskArgs),
    /// List tasks.
    Tasks,
    /// Resolve a product by slug.
    Product { slug: String },
    /// Resolve an initiative by id.
    Initiative(ListingArgs),
    /// Resolve a capability by id.
    Capability(ListingArgs),
    /// Print the breadcrumb of a capability, the capability first.
    Breadcrumb { id: i64 },
    /// Create a record from an input JSON document.
    Create(CreateArgs),
    /// Register a person.
    Person {
        username: String,
        #[arg(long)]
        first_name: Option<String>,
    },
    /// Grant a person a right on a product.
    Grant {
        product: String,
        username: String,
        #[arg(value_enum)]
        right: RightArg,
    },
    /// Record a claim by a person on a task.
    Claim {
        task: i64,
        username: String,
        #[arg(value_enum)]
        kind: ClaimArg,
    },
    /// Print the GraphQL SDL, or a JSON Schema by name.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct TaskArgs {
    pub id: i64,
    /// Resolve `can_edit` for this person id instead of the viewer.
    #[arg(long)]
    pub user_id: Option<i64>,
    /// Show the listing row of the task instead.
    #[arg(long)]
    pub listing: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ListingArgs {
    pub id: i64,
    /// Include the listing rows of its tasks.
    #[arg(long)]
    pub tasks: bool,
}

#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    #[arg(value_enum)]
    pub kind: InputKind,
    /// Path to the input JSON document, `-` for stdin.
    pub file: String,
    /// Owner username (products only).
    #[arg(long)]
    pub owner: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// JSON Schema name (e.g. `task_input`). Prints the SDL when omitted.
    pub name: Option<String>,
    /// List registered JSON Schema names.
    #[arg(long, conflicts_with = "name")]
    pub list: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum InputKind {
    Task,
    Initiative,
    Product,
    Capability,
    CodeRepository,
    Attachment,
}

impl InputKind {
    /// Registry name of the matching input schema.
    #[must_use]
    pub const fn schema_name(self) -> &'static str {
        match self {
            Self::Task => "task_input",
            Self::Initiative => "initiative_input",
            Self::Product => "product_input",
            Self::Capability => "capability_input",
            Self::CodeRepository => "code_repository_input",
            Self::Attachment => "attachment_input",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum RightArg {
    Follower,
    Admin,
    Manager,
    Contributor,
    Owner,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ClaimArg {
    Done,
    Active,
    Failed,
    PutOnHold,
    Abandoned,
    InReview,
}
