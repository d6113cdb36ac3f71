use crate::common::*;
use pretty_assertions::assert_eq;
use session::{GuardConfig, GuardDecision, RouteGuard, SessionState};
use shared_types::{AuthError, Destination};
use std::cell::RefCell;
use std::rc::Rc;

#[tokio::test]
async fn provider_none_ends_the_session() {
    let resolver = resolver_with_staff();
    resolver.login(&credentials("client")).await.unwrap();

    resolver.apply_provider_change(None).await;

    assert_eq!(resolver.state(), SessionState::Absent);
}

#[tokio::test]
async fn same_account_is_not_re_resolved() {
    let resolver = resolver_with_staff();
    resolver.login(&credentials("client")).await.unwrap();
    let fetches = resolver.profiles().fetches.get();

    resolver.apply_provider_change(Some(account("client"))).await;

    assert_eq!(resolver.profiles().fetches.get(), fetches);
    assert_eq!(resolver.current_identity().unwrap().id, "client");
}

#[tokio::test]
async fn new_account_from_provider_is_resolved() {
    let resolver = resolver_with_staff();
    resolver.initialize().await;

    resolver.apply_provider_change(Some(account("crew"))).await;

    assert_eq!(resolver.current_identity().unwrap().id, "crew");
}

#[tokio::test]
async fn login_while_provider_account_resolves_is_rejected() {
    let resolver = resolver_with_staff();
    resolver.initialize().await;
    let release = resolver.profiles().hold_fetches();
    let office = credentials("office");

    let external = resolver.apply_provider_change(Some(account("crew")));
    let login = async {
        let result = resolver.login(&office).await;
        release.notify_one();
        result
    };
    let ((), login) = tokio::join!(external, login);

    assert_eq!(login.unwrap_err(), AuthError::LoginInProgress);
    assert_eq!(resolver.current_identity().unwrap().id, "crew");
    assert_eq!(resolver.provider().authenticate_calls.get(), 0);
}

#[tokio::test]
async fn logout_while_provider_account_resolves_wins() {
    let resolver = resolver_with_staff();
    resolver.login(&credentials("client")).await.unwrap();
    let release = resolver.profiles().hold_fetches();

    let external = resolver.apply_provider_change(Some(account("crew")));
    let logout = async {
        resolver.logout().await;
        release.notify_one();
    };
    tokio::join!(external, logout);

    assert_eq!(resolver.state(), SessionState::Absent);
}

#[tokio::test]
async fn follow_provider_tracks_expiry_and_external_sign_in() {
    let resolver = resolver_with_staff();
    resolver.initialize().await;

    let driver = async {
        resolver.provider().sign_in_elsewhere("crew");
        tokio::task::yield_now().await;
        assert_eq!(resolver.current_identity().map(|i| i.id), Some("crew".to_string()));

        resolver.provider().expire_session();
        tokio::task::yield_now().await;
        assert_eq!(resolver.state(), SessionState::Absent);
    };

    tokio::select! {
        biased;
        _ = resolver.follow_provider() => panic!("provider feed closed early"),
        _ = driver => {}
    }
}

#[tokio::test]
async fn expiry_redirects_guard_to_login_exactly_once() {
    let resolver = resolver_with_staff();
    let nav = RecordingNavigator::new();
    let decisions = Rc::new(RefCell::new(Vec::new()));
    let seen = decisions.clone();

    let watcher = RouteGuard::new(GuardConfig::any_role()).watch(
        resolver.subscribe(),
        nav.clone(),
        move |decision| seen.borrow_mut().push(decision),
    );

    let driver = async {
        resolver.login(&credentials("client")).await.unwrap();
        tokio::task::yield_now().await;

        resolver.provider().expire_session();
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        // Repeated sign-outs leave the state unchanged.
        resolver.logout().await;
        resolver.apply_provider_change(None).await;
        tokio::task::yield_now().await;
    };

    tokio::select! {
        biased;
        _ = watcher => panic!("resolver dropped"),
        _ = resolver.follow_provider() => panic!("provider feed closed early"),
        _ = driver => {}
    }

    assert_eq!(resolver.state(), SessionState::Absent);
    assert_eq!(nav.visits(), vec!["/login".to_string()]);
    assert_eq!(
        decisions.borrow().last(),
        Some(&GuardDecision::Redirect(Destination::Login))
    );
    assert_eq!(decisions.borrow().first(), Some(&GuardDecision::Loading));
    assert!(decisions.borrow().contains(&GuardDecision::Render));
}
