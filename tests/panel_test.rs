mod common;

use std::sync::Arc;

use serde_json::json;

use api_panel_engine::actions::currency::{
    INVALID_AMOUNT, SELECT_DIFFERENT, UNSUPPORTED_CURRENCY,
};
use api_panel_engine::actions::quotes::{NO_QUOTES, QUOTES_FAILURE, QUOTES_LOADED, QUOTES_LOADING};
use api_panel_engine::actions::weather::CITY_NOT_FOUND;
use api_panel_engine::actions::Action;
use api_panel_engine::api::init_tracing;
use api_panel_engine::config::{Endpoints, PanelConfig};
use api_panel_engine::engine::panel::Panel;
use api_panel_engine::engine::random::{SequenceRandom, ThreadRandom};
use api_panel_engine::surface::{Markup, MemorySurface, Surface};
use common::{FakeSource, Reply};

const BASE: &str = "http://fake";

fn panel_with(source: Arc<FakeSource>) -> Panel {
    init_tracing();
    let config = PanelConfig {
        endpoints: Endpoints::all_at(BASE),
        ..PanelConfig::default()
    };
    Panel::with_parts(config, source, Arc::new(ThreadRandom))
}

fn text(s: &str) -> Markup {
    Markup::Text(s.to_string())
}

#[tokio::test]
async fn test_registry_lists_every_action() {
    let panel = panel_with(Arc::new(FakeSource::new()));
    assert_eq!(
        panel.action_names(),
        &[
            "dog", "cat", "weather", "currency", "movies", "github", "joke", "randomuser",
            "advice", "number", "quote", "spacex"
        ]
    );
    assert!(panel.trigger("nope", &MemorySurface::new()).await.is_none());
}

#[tokio::test]
async fn test_dog_success_and_failure() {
    let source = Arc::new(FakeSource::new());
    source.route(
        "/api/breeds/image/random",
        Reply::Json(json!({"message": "https://img/dog.jpg", "status": "success"})),
    );
    let panel = panel_with(source.clone());
    let surface = MemorySurface::new();

    let outcome = panel.trigger("dog", &surface).await.unwrap();
    assert_eq!(outcome.output_id, "dog-output");
    assert_eq!(
        surface.output("dog-output"),
        Some(Markup::Html(r#"<img src="https://img/dog.jpg" alt="Dog" />"#.into()))
    );
    assert_eq!(source.calls(), vec!["http://fake/api/breeds/image/random".to_string()]);

    source.route("/api/breeds/image/random", Reply::Status(500));
    panel.trigger("dog", &surface).await.unwrap();
    assert_eq!(surface.output("dog-output"), Some(text("Failed to fetch dog image.")));

    let stats = panel.stats();
    assert_eq!(stats.triggered, 2);
    assert_eq!(stats.succeeded, 1);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.requests, 2);
    assert_eq!(stats.request_errors, 1);
}

#[tokio::test]
async fn test_weather_city_not_found_skips_forecast() {
    let source = Arc::new(FakeSource::new());
    source.route("/search", Reply::Json(json!([])));
    source.route("/v1/forecast", Reply::Json(json!({"current_weather": {}})));
    let panel = panel_with(source.clone());
    let surface = MemorySurface::new();

    // No city entered at all.
    panel.trigger("weather", &surface).await.unwrap();

    assert_eq!(surface.output("weather-output"), Some(text(CITY_NOT_FOUND)));
    assert_eq!(source.calls_matching("/search"), 1);
    assert_eq!(source.calls_matching("/v1/forecast"), 0);
}

#[tokio::test]
async fn test_weather_geocode_then_forecast() {
    let source = Arc::new(FakeSource::new());
    source.route("/search", Reply::Json(json!([{"lat": "48.85", "lon": "2.35"}])));
    source.route(
        "/v1/forecast",
        Reply::Json(json!({"current_weather": {
            "temperature": 18.5, "windspeed": 7.2, "winddirection": 90, "time": "2024-06-01T10:00"
        }})),
    );
    let panel = panel_with(source.clone());
    let surface = MemorySurface::new();
    surface.set_input("city-input", "  Paris ");

    panel.trigger("weather", &surface).await.unwrap();

    let calls = source.calls();
    assert_eq!(calls[0], "http://fake/search?format=json&q=Paris");
    assert_eq!(
        calls[1],
        "http://fake/v1/forecast?latitude=48.85&longitude=2.35&current_weather=true"
    );
    let out = surface.output("weather-output").unwrap();
    assert!(matches!(out, Markup::Html(_)));
    assert!(out.body().starts_with("<strong>City:</strong> Paris<br>"));
    assert!(out.body().contains("18.5°C"));
}

#[tokio::test]
async fn test_currency_same_codes_issue_no_request() {
    let source = Arc::new(FakeSource::new());
    let panel = panel_with(source.clone());
    let surface = MemorySurface::new();
    surface.set_input("from-currency", "USD");
    surface.set_input("to-currency", "USD");
    surface.set_input("amount", "10");

    panel.trigger("currency", &surface).await.unwrap();

    assert_eq!(surface.output("currency-output"), Some(text(SELECT_DIFFERENT)));
    assert_eq!(source.call_count(), 0);
    assert_eq!(panel.stats().rejected, 1);
}

#[tokio::test]
async fn test_currency_negative_amount_issues_no_request() {
    let source = Arc::new(FakeSource::new());
    let panel = panel_with(source.clone());
    let surface = MemorySurface::new();
    surface.set_input("from-currency", "USD");
    surface.set_input("to-currency", "EUR");
    surface.set_input("amount", "-5");

    panel.trigger("currency", &surface).await.unwrap();

    assert_eq!(surface.output("currency-output"), Some(text(INVALID_AMOUNT)));
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn test_currency_conversion_and_unsupported() {
    let source = Arc::new(FakeSource::new());
    source.route(
        "/v6/latest/USD",
        Reply::Json(json!({"result": "success", "rates": {"EUR": 0.9, "USD": 1}})),
    );
    let panel = panel_with(source.clone());
    let surface = MemorySurface::new();
    surface.set_input("from-currency", "USD");
    surface.set_input("to-currency", "EUR");
    surface.set_input("amount", "2");

    panel.trigger("currency", &surface).await.unwrap();
    assert_eq!(
        surface.output("currency-output"),
        Some(Markup::Html("2 USD = 1.8000 EUR (Rate: 1 USD = 0.9 EUR)".into()))
    );

    surface.set_input("to-currency", "XYZ");
    panel.trigger("currency", &surface).await.unwrap();
    assert_eq!(surface.output("currency-output"), Some(text(UNSUPPORTED_CURRENCY)));
}

#[tokio::test]
async fn test_github_validation_and_not_found() {
    let source = Arc::new(FakeSource::new());
    source.route("/users/ghost", Reply::Status(404));
    let panel = panel_with(source.clone());
    let surface = MemorySurface::new();

    panel.trigger("github", &surface).await.unwrap();
    assert_eq!(surface.output("github-output"), Some(text("Please enter a username.")));
    assert_eq!(source.call_count(), 0);

    surface.set_input("github-input", "ghost");
    panel.trigger("github", &surface).await.unwrap();
    assert_eq!(surface.output("github-output"), Some(text("User not found.")));
    assert_eq!(source.calls(), vec!["http://fake/users/ghost".to_string()]);
}

#[tokio::test]
async fn test_movies_require_injected_key() {
    let source = Arc::new(FakeSource::new());
    source.route(
        "/3/trending/movie/day",
        Reply::Json(json!({"results": [{"title": "One"}, {"title": "Two"}]})),
    );

    let panel = panel_with(source.clone());
    let surface = MemorySurface::new();
    panel.trigger("movies", &surface).await.unwrap();
    assert_eq!(
        surface.output("movie-output"),
        Some(text("Movie lookup is not configured."))
    );
    assert_eq!(source.call_count(), 0);

    let config = PanelConfig {
        endpoints: Endpoints::all_at(BASE),
        ..PanelConfig::default()
    }
    .with_tmdb_api_key("secret");
    let panel = Panel::with_parts(config, source.clone(), Arc::new(SequenceRandom::new(vec![0.0])));
    panel.trigger("movies", &surface).await.unwrap();
    assert_eq!(
        surface.output("movie-output"),
        Some(Markup::Html("<p>Two</p><p>One</p>".into()))
    );
    assert_eq!(
        source.calls(),
        vec!["http://fake/3/trending/movie/day?api_key=secret".to_string()]
    );
}

#[tokio::test]
async fn test_text_actions_render_plain_text() {
    let source = Arc::new(FakeSource::new());
    source.route("/advice", Reply::Json(json!({"slip": {"id": 3, "advice": "Be kind."}})));
    source.route("/random/trivia", Reply::Json(json!({"text": "42 is the answer.", "number": 42})));
    source.route("/joke/Any", Reply::Json(json!({"type": "single", "joke": "Knock knock."})));
    let panel = panel_with(source.clone());
    let surface = MemorySurface::new();

    panel.trigger("advice", &surface).await.unwrap();
    panel.trigger("number", &surface).await.unwrap();
    panel.trigger("joke", &surface).await.unwrap();

    assert_eq!(surface.output("advice-output"), Some(text("Be kind.")));
    assert_eq!(surface.output("number-output"), Some(text("42 is the answer.")));
    assert_eq!(surface.output("joke-output"), Some(Markup::Html("Knock knock.".into())));
    assert!(source.calls().contains(&"http://fake/random/trivia?json".to_string()));
    assert!(source.calls().contains(&"http://fake/joke/Any?type=single".to_string()));
}

#[tokio::test]
async fn test_random_user_missing_results_is_failure() {
    let source = Arc::new(FakeSource::new());
    source.route("/api/", Reply::Json(json!({"results": []})));
    let panel = panel_with(source);
    let surface = MemorySurface::new();

    panel.trigger("randomuser", &surface).await.unwrap();
    assert_eq!(surface.output("randomuser-output"), Some(text("Failed to fetch user.")));
}

#[tokio::test]
async fn test_spacex_empty_list() {
    let source = Arc::new(FakeSource::new());
    source.route("/v4/launches", Reply::Json(json!([])));
    let panel = panel_with(source);
    let surface = MemorySurface::new();

    panel.trigger("spacex", &surface).await.unwrap();
    assert_eq!(
        surface.output("spacex-output"),
        Some(text("No SpaceX launches found."))
    );
}

#[tokio::test]
async fn test_quote_load_then_sample() {
    let source = Arc::new(FakeSource::new());
    source.route(
        "/api/quotes",
        Reply::Json(json!([{"q": "A", "a": "X", "h": ""}, {"q": "B", "a": "Y", "h": ""}])),
    );
    let panel = panel_with(source.clone());
    let surface = MemorySurface::new();

    let quote = panel.action("quote").unwrap();
    assert_eq!(quote.loading_message(), Some(QUOTES_LOADING));

    panel.trigger("quote", &surface).await.unwrap();
    assert_eq!(
        surface.output("quote-output"),
        Some(Markup::Html(QUOTES_LOADED.into()))
    );
    assert_eq!(quote.loading_message(), None);

    let allowed = [
        "\"A\" — <em>X</em>".to_string(),
        "\"B\" — <em>Y</em>".to_string(),
    ];
    for _ in 0..50 {
        let outcome = panel.trigger("quote", &surface).await.unwrap();
        assert!(allowed.contains(&outcome.markup.body().to_string()));
    }
    assert_eq!(source.calls_matching("/api/quotes"), 1);
}

#[tokio::test]
async fn test_quote_failure_then_retry() {
    let source = Arc::new(FakeSource::new());
    source.route("/api/quotes", Reply::Transport);
    let panel = panel_with(source.clone());
    let surface = MemorySurface::new();

    panel.trigger("quote", &surface).await.unwrap();
    assert_eq!(surface.output("quote-output"), Some(text(QUOTES_FAILURE)));

    source.route("/api/quotes", Reply::Json(json!([])));
    panel.trigger("quote", &surface).await.unwrap();
    assert_eq!(
        surface.output("quote-output"),
        Some(Markup::Html(QUOTES_LOADED.into()))
    );

    panel.trigger("quote", &surface).await.unwrap();
    assert_eq!(surface.output("quote-output"), Some(text(NO_QUOTES)));
    assert_eq!(source.calls_matching("/api/quotes"), 2);
}

#[tokio::test]
async fn test_loading_placeholder_is_written_first() {
    struct Recording {
        inner: MemorySurface,
        writes: parking_lot::Mutex<Vec<Markup>>,
    }
    impl Surface for Recording {
        fn read_input(&self, field_id: &str) -> String {
            self.inner.read_input(field_id)
        }
        fn write_output(&self, region_id: &str, markup: Markup) {
            self.writes.lock().push(markup.clone());
            self.inner.write_output(region_id, markup);
        }
    }

    let source = Arc::new(FakeSource::new());
    source.route("/v1/images/search", Reply::Json(json!([{"url": "https://img/cat.png"}])));
    let panel = panel_with(source);
    let surface = Recording {
        inner: MemorySurface::new(),
        writes: parking_lot::Mutex::new(Vec::new()),
    };

    panel.trigger("cat", &surface).await.unwrap();
    let writes = surface.writes.lock().clone();
    assert_eq!(
        writes,
        vec![
            text("Loading..."),
            Markup::Html(r#"<img src="https://img/cat.png" alt="Cat" />"#.into()),
        ]
    );
}
