//! GraphQL SDL rendering of the object and input types.

use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Object,
    Input,
}

struct TypeDef {
    kind: Kind,
    name: &'static str,
    fields: &'static [(&'static str, &'static str)],
}

const fn object(name: &'static str, fields: &'static [(&'static str, &'static str)]) -> TypeDef {
    TypeDef {
        kind: Kind::Object,
        name,
        fields,
    }
}

const fn input(name: &'static str, fields: &'static [(&'static str, &'static str)]) -> TypeDef {
    TypeDef {
        kind: Kind::Input,
        name,
        fields,
    }
}

const TYPES: &[TypeDef] = &[
    object("ExpertiseType", &[
        ("id", "Int!"),
        ("name", "String!"),
        ("category", "Int"),
        ("selectable", "Boolean!"),
    ]),
    object("TaskCategoryType", &[
        ("id", "Int!"),
        ("name", "String!"),
        ("parent", "Int"),
        ("selectable", "Boolean!"),
    ]),
    object("TaskType", &[
        ("id", "Int!"),
        ("publishedId", "Int!"),
        ("title", "String!"),
        ("shortDescription", "String"),
        ("description", "String!"),
        ("product", "ProductType"),
        ("priority", "String"),
        ("canEdit(userId: Int)", "Boolean"),
        ("assignedTo", "PersonType"),
        ("inReview", "Boolean"),
        ("taskCategory", "String"),
        ("taskExpertise", "[ExpertiseType]"),
        ("tags", "[TagType]"),
        ("attachments", "[AttachmentType]"),
        ("dependOn", "[TaskType]"),
        ("relatives", "[TaskType]"),
        ("hasActiveDepends", "Boolean"),
        ("status", "Int"),
        ("link", "String"),
        ("videoUrl", "String"),
        ("previewVideoUrl", "String"),
        ("contributionGuide", "String"),
    ]),
    object("PersonType", &[
        ("id", "Int!"),
        ("username", "String!"),
        ("firstName", "String"),
        ("slug", "String!"),
    ]),
    object("ProductTaskType", &[
        ("id", "Int!"),
        ("product", "Int!"),
        ("task", "Int!"),
    ]),
    object("InitiativeType", &[
        ("id", "Int!"),
        ("name", "String!"),
        ("description", "String"),
        ("status", "String"),
        ("videoUrl", "String"),
        ("availableTaskCount", "Int"),
        ("completedTaskCount", "Int"),
        ("taskTags", "[TagType]"),
        ("previewVideoUrl", "String"),
    ]),
    object("InitiativeTaskType", &[
        ("initiative", "InitiativeType"),
        ("tasks", "[TaskListingType]"),
    ]),
    object("ProductType", &[
        ("id", "Int!"),
        ("name", "String!"),
        ("slug", "String!"),
        ("shortDescription", "String!"),
        ("fullDescription", "String"),
        ("website", "String!"),
        ("videoUrl", "String"),
        ("isPrivate", "Boolean!"),
        ("owner", "String"),
        ("availableTaskNum", "Int"),
        ("totalTaskNum", "Int"),
        ("codeRepositories", "[CodeRepositoryType]"),
    ]),
    object("BreadcrumbType", &[("id", "Int"), ("name", "String")]),
    object("AttachmentType", &[
        ("id", "Int!"),
        ("name", "String"),
        ("path", "String!"),
        ("fileType", "String"),
    ]),
    object("TagType", &[("id", "Int!"), ("name", "String!")]),
    object("CapabilityType", &[
        ("id", "Int"),
        ("name", "String!"),
        ("description", "String"),
        ("videoLink", "String"),
        ("product", "ProductType"),
        ("tasks", "[TaskType]"),
        ("attachments", "[AttachmentType]"),
        ("breadcrumb", "[BreadcrumbType]"),
        ("previewVideoUrl", "String"),
    ]),
    object("CapabilityTaskType", &[
        ("capability", "CapabilityType"),
        ("tasks", "[TaskListingType]"),
    ]),
    object("CodeRepositoryType", &[
        ("id", "Int!"),
        ("product", "Int!"),
        ("repository", "String"),
    ]),
    object("InitiativeDictType", &[
        ("id", "Int"),
        ("name", "String"),
        ("status", "Int"),
        ("description", "String"),
        ("videoUrl", "String"),
    ]),
    object("ProductDictType", &[
        ("name", "String"),
        ("slug", "String"),
        ("owner", "String"),
        ("website", "String"),
        ("detailUrl", "String"),
        ("videoUrl", "String"),
    ]),
    object("PersonJSONData", &[("username", "String"), ("firstName", "String")]),
    object("AssignedToPersonType", &[("slug", "String"), ("firstName", "String")]),
    object("TaskListingType", &[
        ("id", "Int"),
        ("title", "String!"),
        ("shortDescription", "String"),
        ("description", "String"),
        ("priority", "String"),
        ("inReview", "Boolean"),
        ("status", "Int"),
        ("initiative", "InitiativeDictType"),
        ("product", "ProductDictType"),
        ("tags", "[String]"),
        ("category", "String"),
        ("expertise", "String"),
        ("assignedToPerson", "AssignedToPersonType"),
        ("reviewer", "PersonJSONData"),
        ("videoUrl", "String"),
    ]),
    input("TaskInput", &[
        ("initiative", "Int"),
        ("capability", "Int"),
        ("title", "String!"),
        ("shortDescription", "String"),
        ("description", "String!"),
        ("status", "Int"),
        ("productSlug", "String!"),
        ("tags", "[String]"),
        ("category", "String"),
        ("expertise", "String"),
        ("dependOn", "[Int]"),
        ("reviewer", "String!"),
        ("videoUrl", "String"),
        ("priority", "String"),
        ("contributionGuide", "String"),
    ]),
    input("InitiativeInput", &[
        ("name", "String!"),
        ("productSlug", "String"),
        ("description", "String"),
        ("status", "Int"),
        ("videoUrl", "String"),
    ]),
    input("ProductInput", &[
        ("slug", "String"),
        ("name", "String!"),
        ("shortDescription", "String!"),
        ("fullDescription", "String"),
        ("website", "String!"),
        ("videoUrl", "String"),
        ("isPrivate", "Boolean"),
    ]),
    input("CapabilityInput", &[
        ("nodeId", "Int"),
        ("productSlug", "String"),
        ("name", "String!"),
        ("description", "String!"),
        ("videoLink", "String"),
        ("attachments", "[Int]"),
    ]),
    input("CodeRepositoryInput", &[
        ("productSlug", "String!"),
        ("repository", "String"),
        ("accessToken", "String!"),
    ]),
    input("AttachmentInput", &[
        ("taskId", "Int"),
        ("capabilityId", "Int"),
        ("name", "String"),
        ("path", "String!"),
        ("fileType", "String"),
    ]),
];

/// Names of every object and input type, in declaration order.
#[must_use]
pub fn type_names() -> Vec<&'static str> {
    TYPES.iter().map(|t| t.name).collect()
}

/// The object and input types as GraphQL SDL.
#[must_use]
pub fn schema_sdl() -> String {
    let mut out = String::new();
    for (i, def) in TYPES.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let keyword = match def.kind {
            Kind::Object => "type",
            Kind::Input => "input",
        };
        let _ = writeln!(out, "{keyword} {} {{", def.name);
        for (field, ty) in def.fields {
            let _ = writeln!(out, "  {field}: {ty}");
        }
        out.push_str("}\n");
    }
    out
}
