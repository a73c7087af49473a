//! Shared fixtures for stride-db tests and for downstream crates' tests
//! (enable the `test-utils` feature).

pub mod fixtures {
    use stride_core::entities::{Person, Product, Task};
    use stride_core::inputs::{CapabilityInput, InitiativeInput, ProductInput, TaskInput};

    use crate::error::OptionalExt;
    use crate::service::StrideService;

    /// Username of the person that owns seeded products and reviews seeded tasks.
    pub const REVIEWER: &str = "ada";

    /// Create an in-memory service with migrations applied.
    pub async fn test_service() -> StrideService {
        StrideService::new_local(":memory:").await.unwrap()
    }

    pub fn product_input(name: &str) -> ProductInput {
        ProductInput {
            slug: None,
            name: name.to_string(),
            short_description: format!("{name} product"),
            full_description: None,
            website: "https://example.com".to_string(),
            video_url: None,
            is_private: None,
        }
    }

    pub fn initiative_input(name: &str, product_slug: Option<&str>) -> InitiativeInput {
        InitiativeInput {
            name: name.to_string(),
            product_slug: product_slug.map(String::from),
            description: Some(format!("{name} initiative")),
            status: None,
            video_url: None,
        }
    }

    pub fn capability_input(
        node_id: Option<i64>,
        product_slug: Option<&str>,
        name: &str,
    ) -> CapabilityInput {
        CapabilityInput {
            node_id,
            product_slug: product_slug.map(String::from),
            name: name.to_string(),
            description: format!("{name} capability"),
            video_link: None,
            attachments: None,
        }
    }

    /// A minimal task input reviewed by [`REVIEWER`].
    pub fn task_input(product_slug: &str, title: &str) -> TaskInput {
        TaskInput {
            initiative: None,
            capability: None,
            title: title.to_string(),
            short_description: None,
            description: format!("{title} description"),
            status: None,
            product_slug: product_slug.to_string(),
            tags: None,
            category: None,
            expertise: None,
            depend_on: None,
            reviewer: REVIEWER.to_string(),
            video_url: None,
            priority: None,
            contribution_guide: None,
        }
    }

    /// The reviewer person, created on first use.
    pub async fn reviewer(svc: &StrideService) -> Person {
        match svc.get_person_by_username(REVIEWER).await.optional().unwrap() {
            Some(person) => person,
            None => svc.create_person(REVIEWER, Some("Ada")).await.unwrap(),
        }
    }

    /// Create a product named `slug`, owned by the reviewer.
    pub async fn seed_product(svc: &StrideService, slug: &str) -> (Product, Person) {
        let owner = reviewer(svc).await;
        let product = svc
            .create_product(&product_input(slug), Some(owner.id))
            .await
            .unwrap();
        (product, owner)
    }

    /// Create a task under product `acme`, seeding the product if needed.
    pub async fn seed_task(svc: &StrideService, title: &str) -> Task {
        if svc.get_product_by_slug("acme").await.optional().unwrap().is_none() {
            seed_product(svc, "acme").await;
        }
        svc.create_task(&task_input("acme", title)).await.unwrap()
    }
}
