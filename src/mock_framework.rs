//! # Mock Framework
//!
//! Stand-ins for collection actors, so clients can be tested in isolation.
//!
//! [`create_mock_client`] hands back a client plus the receiving end of its
//! channel. The `expect_*` helpers pop the next request and hand the test its
//! payload and responder, letting the test play the collection's part.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest, SnapshotFilter};
use tokio::sync::{mpsc, oneshot, watch};

pub type Responder<R> = oneshot::Sender<Result<R, FrameworkError>>;

pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Responder<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(SnapshotFilter<T>, Responder<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Patch, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Responder<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Answers the next Subscribe request with a fresh watch channel seeded with
/// `initial`. The returned sender lets the test push later snapshots.
pub async fn expect_subscribe<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
    subscription_id: u64,
    initial: Vec<T>,
) -> Option<(SnapshotFilter<T>, watch::Sender<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Subscribe { filter, respond_to }) => {
            let (sender, snapshots) = watch::channel(initial);
            respond_to.send(Ok((subscription_id, snapshots))).ok()?;
            Some((filter, sender))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{User, UserCreate};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<User>(10);

        let create_task = tokio::spawn(async move {
            let user = UserCreate {
                name: "Test".to_string(),
                email: "test@example.com".to_string(),
                phone: None,
            };
            client.create(user).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Test");
        responder.send(Ok("user_1".to_string())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok("user_1".to_string()));
    }

    #[tokio::test]
    async fn test_mock_subscription_delivers_pushed_snapshots() {
        let (client, mut receiver) = create_mock_client::<User>(10);

        let subscribe_task = tokio::spawn(async move { client.subscribe(SnapshotFilter::all()).await });
        let (_filter, snapshots) = expect_subscribe(&mut receiver, 7, Vec::new())
            .await
            .expect("Expected Subscribe request");

        let mut subscription = subscribe_task.await.unwrap().unwrap();
        assert_eq!(subscription.id(), 7);
        assert!(subscription.current().is_empty());

        snapshots.send(vec![User::new("Ana", "ana@example.com")]).unwrap();
        let latest = subscription.changed().await.unwrap();
        assert_eq!(latest[0].email, "ana@example.com");
    }
}
