use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Utc;
use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed};
use models::filter::{SortBy, ToyFilter};
use models::toy::{default_img_url, Toy, ToyInput};
use models::user::{LoggedinUser, ToyOwner};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::pagination::{self, PAGE_SIZE};
use crate::storage::ToyStore;

/// One page of toys plus the page count of the whole filtered set.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub toys: Vec<Toy>,
    pub max_page: usize,
}

/// Catalog service: the toy collection held in memory and mirrored to a `ToyStore`.
///
/// Every mutation updates the in-memory list first and then writes the whole
/// list back. A failed write is returned to the caller but the in-memory
/// change stays, and readers may see a mutation before its write finishes.
pub struct ToyService {
    toys: Arc<RwLock<Vec<Toy>>>,
    store: Arc<dyn ToyStore>,
    page_size: usize,
}

impl ToyService {
    /// Load the collection from `store` with the default page size.
    pub async fn new(store: Arc<dyn ToyStore>) -> Result<Arc<Self>, ServiceError> {
        Self::with_page_size(store, PAGE_SIZE).await
    }

    pub async fn with_page_size(store: Arc<dyn ToyStore>, page_size: usize) -> Result<Arc<Self>, ServiceError> {
        let mut toys = store.load_all().await?;
        for toy in &mut toys {
            toy.owner.strip_score();
        }
        info!(count = toys.len(), page_size, "toy catalog loaded");
        Ok(Arc::new(Self { toys: Arc::new(RwLock::new(toys)), store, page_size: page_size.max(1) }))
    }

    /// Filter by name, price and stock, then sort, then cut out the requested page.
    pub async fn query(&self, filter: &ToyFilter) -> QueryResult {
        let matcher = name_matcher(&filter.txt);
        let toys = self.toys.read().await;
        let mut filtered: Vec<Toy> = toys
            .iter()
            .filter(|t| matcher.as_ref().map_or(true, |re| re.is_match(&t.name)))
            .filter(|t| filter.max_price.map_or(true, |max| t.price <= max))
            .filter(|t| !filter.in_stock || t.in_stock)
            .cloned()
            .collect();
        drop(toys);

        if let Some(sort_by) = filter.sort_by {
            sort_toys(&mut filtered, sort_by);
        }

        let max_page = pagination::max_page(filtered.len(), self.page_size);
        let toys = match filter.page_idx {
            Some(page_idx) => pagination::paginate(filtered, page_idx, self.page_size),
            None => filtered,
        };
        debug!(returned = toys.len(), max_page, "toy query");
        QueryResult { toys, max_page }
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Toy> {
        let toys = self.toys.read().await;
        toys.iter().find(|t| t.id == id).cloned()
    }

    /// Delete a toy owned by `actor` (or any toy when `actor` is an admin).
    pub async fn remove(&self, id: &str, actor: &LoggedinUser) -> Result<(), ServiceError> {
        let mut toys = self.toys.write().await;
        let idx = toys
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ServiceError::not_found("toy"))?;
        if !actor.can_modify(&toys[idx].owner) {
            warn!(toy_id = %id, actor_id = %actor.id, "remove rejected: actor does not own toy");
            return Err(ServiceError::forbidden("toy"));
        }
        toys.remove(idx);
        drop(toys);

        info!(toy_id = %id, actor_id = %actor.id, "toy removed");
        self.persist().await
    }

    /// Update the toy named by `input.id`, or create a new one owned by `actor`.
    ///
    /// Updates only touch `name`, `price` and a non-blank `img_url`.
    pub async fn save(&self, input: ToyInput, actor: &LoggedinUser) -> Result<Toy, ServiceError> {
        input.validate()?;

        let target_id = input.target_id().map(str::to_owned);
        let mut toys = self.toys.write().await;
        let saved = match target_id {
            Some(id) => {
                let existing = toys
                    .iter_mut()
                    .find(|t| t.id == id)
                    .ok_or_else(|| ServiceError::not_found("toy"))?;
                if !actor.can_modify(&existing.owner) {
                    warn!(toy_id = %id, actor_id = %actor.id, "update rejected: actor does not own toy");
                    return Err(ServiceError::forbidden("toy"));
                }
                if let Some(url) = input.explicit_img_url() {
                    existing.img_url = url.to_owned();
                }
                existing.name = input.name;
                existing.price = input.price;
                info!(toy_id = %id, actor_id = %actor.id, "toy updated");
                existing.clone()
            }
            None => {
                let id = fresh_id(&toys);
                let img_url = match input.explicit_img_url() {
                    Some(url) => url.to_owned(),
                    None => default_img_url(&input.name, &id),
                };
                let toy = Toy {
                    id,
                    name: input.name,
                    price: input.price,
                    in_stock: rand::random::<bool>(),
                    img_url,
                    labels: input.labels.unwrap_or_default(),
                    created_at: Utc::now().timestamp_millis(),
                    owner: ToyOwner::from(actor),
                    extra: Default::default(),
                };
                toys.push(toy.clone());
                info!(toy_id = %toy.id, actor_id = %actor.id, "toy created");
                toy
            }
        };
        drop(toys);

        self.persist().await?;
        Ok(saved)
    }

    async fn persist(&self) -> Result<(), ServiceError> {
        let toys = self.toys.read().await;
        self.store.save_all(&toys).await?;
        Ok(())
    }
}

/// Case-insensitive name pattern; falls back to a literal match when `txt` is not a valid regex.
fn name_matcher(txt: &str) -> Option<Regex> {
    if txt.is_empty() {
        return None;
    }
    let build = |pattern: &str| RegexBuilder::new(pattern).case_insensitive(true).build();
    build(txt).or_else(|_| build(&regex::escape(txt))).ok()
}

fn sort_toys(toys: &mut [Toy], sort_by: SortBy) {
    match sort_by {
        SortBy::Price => toys.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortBy::CreatedAt => toys.sort_by_key(|t| t.created_at),
        SortBy::Name => match name_collator() {
            Some(collator) => toys.sort_by(|a, b| collator.compare(&a.name, &b.name)),
            None => toys.sort_by(|a, b| compare_names(&a.name, &b.name)),
        },
    }
}

/// Root-locale collation at tertiary strength: accents and case only break ties.
fn name_collator() -> Option<CollatorBorrowed<'static>> {
    let mut options = CollatorOptions::default();
    options.strength = Some(Strength::Tertiary);
    Collator::try_new(Default::default(), options)
        .map_err(|e| warn!(error = %e, "name collator unavailable, using case-folded order"))
        .ok()
}

/// Case-folded order, lowercase first on ties.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a))
}

fn fresh_id(toys: &[Toy]) -> String {
    loop {
        let id = Uuid::new_v4().simple().to_string();
        if !toys.iter().any(|t| t.id == id) {
            return id;
        }
    }
}
