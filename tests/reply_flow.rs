use climateclock_bot::commands::ReplyKind;
use climateclock_bot::feeds::climate_clock::ClimateClockFetcher;
use climateclock_bot::markdown::unmark;
use climateclock_bot::replies::{self, DEFAULT_MAX_NEWS};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn clock_body() -> serde_json::Value {
    json!({
        "status": "success",
        "data": {
            "modules": {
                "carbon_deadline_1": {
                    "description": "Time to act",
                    "timestamp": "2099-01-01T00:00:00+00:00"
                },
                "renewables_1": { "description": "Renewables share.", "initial": 12.5 },
                "green_climate_fund_1": { "description": "Green Climate Fund", "initial": 10 },
                "indigenous_land_1": { "description": "Indigenous land.", "initial": 43.5 },
                "newsfeed_1": {
                    "newsfeed": [
                        { "source": "Reuters", "headline": "Solar passes coal", "link": "https://example.com/1" }
                    ]
                }
            }
        }
    })
}

fn fetcher_for(server: &MockServer) -> ClimateClockFetcher {
    ClimateClockFetcher::with_url(format!("{}/v1/clock?device=widget", server.uri()))
}

#[tokio::test]
async fn test_all_reply_makes_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/clock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clock_body()))
        .expect(1)
        .mount(&server)
        .await;

    let kind = ReplyKind::from_command(&unmark("!climateclock all")).unwrap();
    let reply = replies::render(kind, &fetcher_for(&server), DEFAULT_MAX_NEWS)
        .await
        .unwrap();

    let sections: Vec<&str> = reply.split("\n\n").collect();
    assert!(sections[0].starts_with("Time to act:\n"));
    assert_eq!(sections[1], "Renewables share:\n12.5%");
    assert_eq!(sections[2], "Green Climate Fund:\n$10 billion");
    assert_eq!(sections[3], "Indigenous land:\n43,000,000 km^2");
    assert_eq!(sections[4], "News:");
    assert_eq!(sections[5], "Reuters: [Solar passes coal](https://example.com/1)");
}

#[tokio::test]
async fn test_upstream_failure_yields_no_reply() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/clock"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server);
    for kind in [
        ReplyKind::All,
        ReplyKind::Feed,
        ReplyKind::Deadline,
        ReplyKind::Gcf,
        ReplyKind::Indie,
        ReplyKind::Renewables,
    ] {
        assert_eq!(replies::render(kind, &fetcher, DEFAULT_MAX_NEWS).await, None);
    }
}

#[tokio::test]
async fn test_incomplete_body_yields_no_reply() {
    let server = MockServer::start().await;
    let mut body = clock_body();
    body["data"]["modules"]
        .as_object_mut()
        .unwrap()
        .remove("newsfeed_1");

    Mock::given(method("GET"))
        .and(path("/v1/clock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server);
    assert_eq!(replies::render(ReplyKind::Gcf, &fetcher, DEFAULT_MAX_NEWS).await, None);
}
