use std::io::Read;

use anyhow::Context;
use serde::de::DeserializeOwned;
use stride_core::inputs::{
    AttachmentInput, CapabilityInput, CodeRepositoryInput, InitiativeInput, ProductInput, TaskInput,
};
use stride_schema::registry::SchemaRegistry;
use stride_schema::types::{
    AttachmentType, CapabilityType, CodeRepositoryType, InitiativeType, ProductType, TaskType,
};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{CreateArgs, InputKind};
use crate::context::AppContext;
use crate::output::output;

/// Handle `stride create`.
pub async fn handle(args: &CreateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let document = read_document(&args.file)?;
    let resolver = ctx.resolver();
    let store = &ctx.service;

    match args.kind {
        InputKind::Task => {
            let input: TaskInput = parse_input(args.kind, &document)?;
            let task = store.create_task(&input).await?;
            output(&TaskType::from(task).resolve(&resolver, None).await?, flags.format)
        }
        InputKind::Initiative => {
            let input: InitiativeInput = parse_input(args.kind, &document)?;
            let initiative = store.create_initiative(&input).await?;
            output(&InitiativeType::from(initiative).resolve(&resolver).await?, flags.format)
        }
        InputKind::Product => {
            let input: ProductInput = parse_input(args.kind, &document)?;
            let owner_id = match args.owner.as_deref() {
                Some(username) => Some(store.get_person_by_username(username).await?.id),
                None => None,
            };
            let product = store.create_product(&input, owner_id).await?;
            output(&ProductType::from(product).resolve(&resolver).await?, flags.format)
        }
        InputKind::Capability => {
            let input: CapabilityInput = parse_input(args.kind, &document)?;
            let capability = store.create_capability(&input).await?;
            output(&CapabilityType::from(capability).resolve(&resolver).await?, flags.format)
        }
        InputKind::CodeRepository => {
            let input: CodeRepositoryInput = parse_input(args.kind, &document)?;
            let repository = store.create_code_repository(&input).await?;
            output(&CodeRepositoryType::from(repository), flags.format)
        }
        InputKind::Attachment => {
            let input: AttachmentInput = parse_input(args.kind, &document)?;
            let attachment = store.create_attachment(&input).await?;
            output(&AttachmentType::from(attachment), flags.format)
        }
    }
}

fn read_document(file: &str) -> anyhow::Result<serde_json::Value> {
    let text = if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read input from stdin")?;
        buf
    } else {
        std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))?
    };
    serde_json::from_str(&text).with_context(|| format!("{file} is not valid JSON"))
}

/// Check `document` against the input's JSON Schema, then deserialize it.
fn parse_input<T: DeserializeOwned>(kind: InputKind, document: &serde_json::Value) -> anyhow::Result<T> {
    SchemaRegistry::new()
        .validate(kind.schema_name(), document)
        .with_context(|| format!("invalid {}", kind.schema_name()))?;
    Ok(serde_json::from_value(document.clone())?)
}
