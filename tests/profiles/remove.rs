use github_profiles::{DeleteOutcome, ProfileError, ProfileInput};

use crate::common::service;

#[tokio::test]
async fn remove_existing() {
    let service = service();
    let id = service.create(ProfileInput::default()).await.unwrap().document_id;

    let outcome = service.remove(&id).await.unwrap();

    assert_eq!(outcome, Some(DeleteOutcome { deleted: true }));
    assert!(matches!(
        service.find_one(&id).await,
        Err(ProfileError::NotFound(_))
    ));
}

#[tokio::test]
async fn remove_missing_is_not_found() {
    let service = service();

    let err = service.remove("missing-id").await.unwrap_err();
    assert!(matches!(err, ProfileError::NotFound(_)));
}

#[tokio::test]
async fn unconfirmed_delete_is_not_a_success() {
    let service = service();
    let id = service.create(ProfileInput::default()).await.unwrap().document_id;
    service.store().set_refuse_deletes(true);

    let outcome = service.remove(&id).await.unwrap();

    assert_eq!(outcome, None);
    assert!(service.find_one(&id).await.is_ok());
}

#[tokio::test]
async fn remove_twice() {
    let service = service();
    let id = service.create(ProfileInput::default()).await.unwrap().document_id;

    assert!(service.remove(&id).await.unwrap().is_some());
    assert!(matches!(
        service.remove(&id).await,
        Err(ProfileError::NotFound(_))
    ));
}
