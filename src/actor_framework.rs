use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Trait that any collection document must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and creation params
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;
}

/// Failures raised by the resource actor plumbing itself.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the response")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Rejected(String),
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Predicate that decides which documents a live query sees.
pub struct SnapshotFilter<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> SnapshotFilter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(predicate))
    }

    pub fn all() -> Self {
        Self::new(|_| true)
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> Debug for SnapshotFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SnapshotFilter")
    }
}

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: SnapshotFilter<T>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Subscribe {
        filter: SnapshotFilter<T>,
        respond_to: Response<(u64, watch::Receiver<Vec<T>>)>,
    },
    Unsubscribe {
        subscription_id: u64,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

struct Subscriber<T> {
    filter: SnapshotFilter<T>,
    sender: watch::Sender<Vec<T>>,
}

pub struct ResourceActor<T: Entity> {
    name: &'static str,
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    insertion_order: Vec<T::Id>,
    subscribers: HashMap<u64, Subscriber<T>>,
    next_subscription_id: u64,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        name: &'static str,
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            name,
            receiver,
            store: HashMap::new(),
            insertion_order: Vec::new(),
            subscribers: HashMap::new(),
            next_subscription_id: 1,
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs until every client (and subscription handle) is dropped.
    pub async fn run(mut self) {
        info!(resource = self.name, "Resource actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let result = self.handle_create(params);
                    if result.is_ok() {
                        self.publish();
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let _ = respond_to.send(Ok(self.snapshot(&filter)));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => item
                            .on_update(patch)
                            .map(|_| item.clone())
                            .map_err(FrameworkError::Rejected),
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    if result.is_ok() {
                        self.publish();
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => item.handle_action(action).map_err(FrameworkError::Rejected),
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    if result.is_ok() {
                        self.publish();
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Subscribe { filter, respond_to } => {
                    let subscription_id = self.next_subscription_id;
                    self.next_subscription_id += 1;
                    let (sender, receiver) = watch::channel(self.snapshot(&filter));
                    self.subscribers.insert(subscription_id, Subscriber { filter, sender });
                    debug!(resource = self.name, subscription_id, "Subscription opened");
                    let _ = respond_to.send(Ok((subscription_id, receiver)));
                }
                ResourceRequest::Unsubscribe { subscription_id, respond_to } => {
                    let result = match self.subscribers.remove(&subscription_id) {
                        Some(_) => {
                            debug!(resource = self.name, subscription_id, "Subscription closed");
                            Ok(())
                        }
                        None => Err(FrameworkError::NotFound(format!("subscription {}", subscription_id))),
                    };
                    let _ = respond_to.send(result);
                }
            }
        }
        info!(resource = self.name, "Resource actor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T::Id, FrameworkError> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Rejected)?;
        item.on_create().map_err(FrameworkError::Rejected)?;
        self.store.insert(id.clone(), item);
        self.insertion_order.push(id.clone());
        Ok(id)
    }

    fn snapshot(&self, filter: &SnapshotFilter<T>) -> Vec<T> {
        self.insertion_order
            .iter()
            .filter_map(|id| self.store.get(id))
            .filter(|item| filter.matches(item))
            .cloned()
            .collect()
    }

    /// Pushes fresh snapshots to live queries, pruning those whose receiver is gone.
    fn publish(&mut self) {
        let mut closed = Vec::new();
        for (subscription_id, subscriber) in &self.subscribers {
            if subscriber.sender.send(self.snapshot(&subscriber.filter)).is_err() {
                closed.push(*subscription_id);
            }
        }
        for subscription_id in closed {
            warn!(resource = self.name, subscription_id, "Pruning abandoned subscription");
            self.subscribers.remove(&subscription_id);
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub(crate) fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self, filter: SnapshotFilter<T>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { filter, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }

    /// Opens a live query. The returned handle owns the unsubscribe lifecycle.
    pub async fn subscribe(&self, filter: SnapshotFilter<T>) -> Result<Subscription<T>, FrameworkError> {
        let (id, receiver) = self
            .request(|respond_to| ResourceRequest::Subscribe { filter, respond_to })
            .await?;
        Ok(Subscription {
            id,
            receiver,
            client: self.clone(),
        })
    }
}

/// Cancellable handle to a live query.
pub struct Subscription<T: Entity> {
    id: u64,
    receiver: watch::Receiver<Vec<T>>,
    client: ResourceClient<T>,
}

impl<T: Entity> Subscription<T> {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The most recent snapshot delivered to this subscription.
    pub fn current(&self) -> Vec<T> {
        self.receiver.borrow().clone()
    }

    /// Waits for the next snapshot.
    pub async fn changed(&mut self) -> Result<Vec<T>, FrameworkError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    pub async fn unsubscribe(self) -> Result<(), FrameworkError> {
        let subscription_id = self.id;
        self.client
            .request(|respond_to| ResourceRequest::Unsubscribe { subscription_id, respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Sample {
        id: String,
        title: String,
        featured: bool,
    }

    #[derive(Debug)]
    struct SampleCreate {
        title: String,
    }

    #[derive(Debug)]
    struct SamplePatch {
        title: Option<String>,
    }

    #[derive(Debug)]
    enum SampleAction {
        Feature,
    }

    impl Entity for Sample {
        type Id = String;
        type CreateParams = SampleCreate;
        type Patch = SamplePatch;
        type Action = SampleAction;
        type ActionResult = bool;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create_params(id: String, params: SampleCreate) -> Result<Self, String> {
            if params.title.is_empty() {
                return Err("title required".to_string());
            }
            Ok(Self {
                id,
                title: params.title,
                featured: false,
            })
        }

        fn on_update(&mut self, patch: SamplePatch) -> Result<(), String> {
            if let Some(title) = patch.title {
                self.title = title;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: SampleAction) -> Result<bool, String> {
            match action {
                SampleAction::Feature => {
                    let changed = !self.featured;
                    self.featured = true;
                    Ok(changed)
                }
            }
        }
    }

    fn spawn_samples() -> ResourceClient<Sample> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("sample_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new("samples", 10, next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = spawn_samples();

        let id = client.create(SampleCreate { title: "Intro".into() }).await.unwrap();
        assert_eq!(id, "sample_1");

        let changed = client.perform_action(id.clone(), SampleAction::Feature).await.unwrap();
        assert!(changed);
        let sample = client.get(id.clone()).await.unwrap().unwrap();
        assert!(sample.featured);

        let changed_again = client.perform_action(id.clone(), SampleAction::Feature).await.unwrap();
        assert!(!changed_again);
    }

    #[tokio::test]
    async fn test_rejected_create_and_missing_update() {
        let client = spawn_samples();

        let err = client.create(SampleCreate { title: String::new() }).await.unwrap_err();
        assert_eq!(err, FrameworkError::Rejected("title required".to_string()));

        let err = client
            .update("sample_9".to_string(), SamplePatch { title: None })
            .await
            .unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("sample_9".to_string()));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let client = spawn_samples();
        for title in ["a", "b", "c"] {
            client.create(SampleCreate { title: title.into() }).await.unwrap();
        }

        let titles: Vec<String> = client
            .list(SnapshotFilter::new(|s: &Sample| s.title != "b"))
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_subscription_receives_snapshots_until_unsubscribed() {
        let client = spawn_samples();
        client.create(SampleCreate { title: "first".into() }).await.unwrap();

        let mut subscription = client.subscribe(SnapshotFilter::all()).await.unwrap();
        assert_eq!(subscription.current().len(), 1);

        client.create(SampleCreate { title: "second".into() }).await.unwrap();
        let snapshot = subscription.changed().await.unwrap();
        assert_eq!(snapshot.len(), 2);

        let subscription_id = subscription.id();
        subscription.unsubscribe().await.unwrap();

        // A second unsubscribe for the same id is reported, proving removal.
        let err = client
            .request(|respond_to| ResourceRequest::Unsubscribe { subscription_id, respond_to })
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_filtered_subscription_ignores_other_documents() {
        let client = spawn_samples();
        let mut subscription = client
            .subscribe(SnapshotFilter::new(|s: &Sample| s.featured))
            .await
            .unwrap();
        assert!(subscription.current().is_empty());

        let id = client.create(SampleCreate { title: "quiet".into() }).await.unwrap();
        let snapshot = subscription.changed().await.unwrap();
        assert!(snapshot.is_empty());

        client.perform_action(id, SampleAction::Feature).await.unwrap();
        let snapshot = tokio::time::timeout(Duration::from_secs(1), subscription.changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snapshot.len(), 1);
    }
}
