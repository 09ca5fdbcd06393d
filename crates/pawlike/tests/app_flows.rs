//! End-to-end client flows against the in-memory backend.

use pawlike::auth::{self, AuthValues};
use pawlike::{
    ClientError, ErrorCode, Feed, Form, MemoryApi, Navigator, Operation, Profile, Session,
    Submission, ToggleOutcome, View,
};

const IMG_A: &str = "https://images.dog.ceo/breeds/shiba/shiba-1.jpg";
const IMG_B: &str = "https://images.dog.ceo/breeds/shiba/shiba-2.jpg";

fn api() -> MemoryApi {
    MemoryApi::new([IMG_A, IMG_B]).with_user("bob@example.com", "Passw0rd!")
}

fn fill(form: &mut Form<AuthValues>, email: &str, password: &str) {
    form.set_field_value("email", email).unwrap();
    form.set_field_value("password", password).unwrap();
}

async fn sign_in(api: &MemoryApi, session: &mut Session, nav: &mut Navigator) {
    let mut form = auth::login_form();
    fill(&mut form, "bob@example.com", "Passw0rd!");
    let outcome = auth::submit_login(&mut form, api, session, nav)
        .await
        .unwrap();
    assert_eq!(outcome, Submission::Completed);
}

#[tokio::test]
async fn login_like_and_see_it_on_profile() {
    let api = api();
    let mut session = Session::new();
    let mut nav = Navigator::new(View::Login);

    sign_in(&api, &mut session, &mut nav).await;
    assert!(session.is_authenticated());
    assert_eq!(nav.current(), View::Home);

    let mut feed = Feed::new();
    let image = feed.fetch_next(&api, &session).await.unwrap();
    assert_eq!(image.image_url, IMG_A);
    assert!(!feed.is_liked());

    assert_eq!(
        feed.toggle_like(&api, &session).await.unwrap(),
        ToggleOutcome::Committed(true)
    );
    assert!(feed.is_liked());

    nav.change_view(View::Profile);
    let mut profile = Profile::new();
    assert!(profile.is_loading());
    let images = profile.load(&api, &session, &mut nav).await.unwrap();
    assert_eq!(images, [IMG_A.to_string()]);
    assert!(!profile.is_loading());
    assert_eq!(nav.current(), View::Profile);
}

#[tokio::test]
async fn liked_flag_follows_the_image_around() {
    let api = api();
    let mut session = Session::new();
    let mut nav = Navigator::default();
    sign_in(&api, &mut session, &mut nav).await;

    let mut feed = Feed::new();
    feed.fetch_next(&api, &session).await.unwrap();
    feed.toggle_like(&api, &session).await.unwrap();

    // Next image is not liked.
    feed.fetch_next(&api, &session).await.unwrap();
    assert_eq!(feed.current_url(), Some(IMG_B));
    assert!(!feed.is_liked());

    // Back to the first: the server reports it liked.
    let image = feed.fetch_next(&api, &session).await.unwrap();
    assert_eq!(image.image_url, IMG_A);
    assert!(image.liked);
    assert!(feed.is_liked());

    feed.toggle_like(&api, &session).await.unwrap();
    assert!(!feed.is_liked());
}

#[tokio::test]
async fn failed_like_rolls_back_in_feed() {
    let api = api();
    let mut session = Session::new();
    let mut nav = Navigator::default();
    sign_in(&api, &mut session, &mut nav).await;

    let mut feed = Feed::new();
    feed.fetch_next(&api, &session).await.unwrap();

    api.fail_next(Operation::LikeImage, ErrorCode::DatabaseError);
    let err = feed.toggle_like(&api, &session).await.unwrap_err();

    assert_eq!(err.api_error().map(|e| e.code), Some(ErrorCode::DatabaseError));
    assert!(!feed.is_liked());
    assert!(!feed.is_like_pending());
}

#[tokio::test]
async fn anonymous_feed_cannot_like() {
    let api = api();
    let session = Session::new();

    let mut feed = Feed::new();
    let image = feed.fetch_next(&api, &session).await.unwrap();
    assert!(!image.liked);

    assert_eq!(
        feed.toggle_like(&api, &session).await.unwrap(),
        ToggleOutcome::Ignored
    );
    assert_eq!(api.call_count(Operation::LikeImage), 0);
}

#[tokio::test]
async fn fetch_failure_keeps_previous_image() {
    let api = api();
    let session = Session::new();
    let mut feed = Feed::new();
    feed.fetch_next(&api, &session).await.unwrap();

    api.fail_next(Operation::RandomDog, ErrorCode::ExternalApiError);
    assert!(feed.fetch_next(&api, &session).await.is_err());

    assert_eq!(feed.current_url(), Some(IMG_A));
    assert_eq!(
        feed.error().map(|e| e.code),
        Some(ErrorCode::ExternalApiError)
    );
    assert!(!feed.is_fetching());

    feed.fetch_next(&api, &session).await.unwrap();
    assert!(feed.error().is_none());
}

#[tokio::test]
async fn invalid_login_form_never_reaches_the_api() {
    let api = api();
    let mut session = Session::new();
    let mut nav = Navigator::new(View::Login);

    let mut form = auth::login_form();
    fill(&mut form, "bob@x", "");
    let outcome = auth::submit_login(&mut form, &api, &mut session, &mut nav)
        .await
        .unwrap();

    assert_eq!(outcome, Submission::Rejected);
    assert_eq!(form.visible_error("email"), Some("Please enter a valid email address"));
    assert_eq!(form.visible_error("password"), Some("Password is required"));
    assert!(api.calls().is_empty());
    assert_eq!(nav.current(), View::Login);
}

#[tokio::test]
async fn wrong_password_keeps_form_and_reports() {
    let api = api();
    let mut session = Session::new();
    let mut nav = Navigator::new(View::Login);

    let mut form = auth::login_form();
    fill(&mut form, "bob@example.com", "WrongPass1!");
    let err = auth::submit_login(&mut form, &api, &mut session, &mut nav)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Api(ref e) if e.code == ErrorCode::InvalidCredentials
    ));
    assert!(!session.is_authenticated());
    assert_eq!(form.values().email, "bob@example.com");
    assert!(!form.is_submitting());
    assert_eq!(nav.current(), View::Login);
}

#[tokio::test]
async fn register_signs_straight_in() {
    let api = MemoryApi::new([IMG_A]);
    let mut session = Session::new();
    let mut nav = Navigator::new(View::Register);

    let mut form = auth::register_form();
    fill(&mut form, "new@example.com", "Str0ng!pass");
    let outcome = auth::submit_register(&mut form, &api, &mut session, &mut nav)
        .await
        .unwrap();

    assert_eq!(outcome, Submission::Completed);
    assert_eq!(session.user_id(), api.user_id("new@example.com").as_deref());
    assert_eq!(nav.current(), View::Home);
    assert_eq!(form.values(), &AuthValues::default());
    assert_eq!(api.calls(), [Operation::Register, Operation::Login]);
}

#[tokio::test]
async fn register_duplicate_email_is_reported() {
    let api = api();
    let mut session = Session::new();
    let mut nav = Navigator::new(View::Register);

    let mut form = auth::register_form();
    fill(&mut form, "bob@example.com", "Str0ng!pass");
    let err = auth::submit_register(&mut form, &api, &mut session, &mut nav)
        .await
        .unwrap_err();

    assert_eq!(
        err.api_error().map(|e| e.code),
        Some(ErrorCode::EmailAlreadyExists)
    );
    assert_eq!(form.values().email, "bob@example.com");
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn weak_register_password_shows_first_rule() {
    let api = api();
    let mut session = Session::new();
    let mut nav = Navigator::new(View::Register);

    let mut form = auth::register_form();
    fill(&mut form, "new@example.com", "alllowercase1!");
    let outcome = auth::submit_register(&mut form, &api, &mut session, &mut nav)
        .await
        .unwrap();

    assert_eq!(outcome, Submission::Rejected);
    assert_eq!(
        form.visible_error("password"),
        Some("Password must contain an uppercase letter")
    );
}

#[tokio::test]
async fn logout_then_profile_redirects_home() {
    let api = api();
    let mut session = Session::new();
    let mut nav = Navigator::default();
    sign_in(&api, &mut session, &mut nav).await;

    nav.change_view(View::Profile);
    auth::logout(&mut session, &mut nav);
    assert!(!session.is_authenticated());
    assert_eq!(nav.current(), View::Home);

    nav.change_view(View::Profile);
    let mut profile = Profile::new();
    let err = profile.load(&api, &session, &mut nav).await.unwrap_err();
    assert!(err.is_not_authenticated());
    assert_eq!(nav.current(), View::Home);
    assert_eq!(api.call_count(Operation::LikedImages), 0);
}

#[tokio::test]
async fn restored_session_can_like() {
    let api = api();
    let mut session = Session::new();
    let mut nav = Navigator::default();
    sign_in(&api, &mut session, &mut nav).await;
    let token = session.token().unwrap().to_string();

    let mut restored = Session::new();
    let user_id = restored.restore(&api, token).await.unwrap().to_string();
    assert_eq!(Some(user_id.as_str()), session.user_id());

    let mut feed = Feed::new();
    feed.fetch_next(&api, &restored).await.unwrap();
    assert_eq!(
        feed.toggle_like(&api, &restored).await.unwrap(),
        ToggleOutcome::Committed(true)
    );
}
