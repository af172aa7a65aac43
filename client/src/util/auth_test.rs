use super::*;

use std::sync::Mutex;

use session::UserRecord;

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = AuthState { loading: false, ..AuthState::default() };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    let state = AuthState::default();
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_user_exists() {
    let state = AuthState {
        user: Some(UserRecord { email: "a@x.com".to_owned(), ..UserRecord::default() }),
        loading: false,
        is_admin: false,
        admin_pending: true,
    };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn redirect_replaces_history_entry() {
    assert!(redirect_options().replace);
}

#[test]
fn signal_host_publishes_views_and_navigates() {
    let owner = Owner::new();
    owner.with(|| {
        let routes = Arc::new(Mutex::new(Vec::<(String, bool)>::new()));
        let recorded = Arc::clone(&routes);
        let view = RwSignal::new(GuardView::Loading);
        let host = SignalGuardHost::new(view, move |route: &str, opts: NavigateOptions| {
            recorded.lock().unwrap().push((route.to_owned(), opts.replace));
        });

        host.show(GuardView::Checking);
        assert_eq!(view.get_untracked(), GuardView::Checking);

        host.redirect("/");
        assert_eq!(*routes.lock().unwrap(), vec![("/".to_owned(), true)]);
    });
}
