use crate::bridge::model::{
    FeedbackRequest, LogScanRequest, StatusReply, SummarizeRequest, SummarizeResponse,
};
use crate::workflow::curator::Curator;
use anyhow::Context;
use log::info;
use parkcore::ParkingAgent;
use std::{convert::Infallible, net::SocketAddr, sync::Arc, thread};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter, Rejection, Reply};

const MAX_BODY_BYTES: u64 = 4 * 1024 * 1024;
const ALLOW_ANY: &str = "*";

fn with_agent(
    agent: Arc<ParkingAgent>,
) -> impl Filter<Extract = (Arc<ParkingAgent>,), Error = Infallible> + Clone {
    warp::any().map(move || agent.clone())
}

fn json_body<T>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone
where
    T: serde::de::DeserializeOwned + Send,
{
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

/// Answers every CORS preflight, granting whichever method and headers the
/// browser asks for.
fn preflight() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::options()
        .and(warp::header::optional::<String>(
            "access-control-request-method",
        ))
        .and(warp::header::optional::<String>(
            "access-control-request-headers",
        ))
        .map(|method: Option<String>, headers: Option<String>| {
            let reply = warp::reply::with_status(warp::reply(), StatusCode::NO_CONTENT);
            let reply = warp::reply::with_header(
                reply,
                "access-control-allow-methods",
                method.unwrap_or_else(|| ALLOW_ANY.to_string()),
            );
            let reply = warp::reply::with_header(
                reply,
                "access-control-allow-headers",
                headers.unwrap_or_else(|| ALLOW_ANY.to_string()),
            );
            warp::reply::with_header(reply, "access-control-max-age", "600")
        })
}

/// Full route tree: the four agent endpoints plus today's scan log. Any
/// origin, method and header is allowed for the browser dashboard.
pub fn routes(
    agent: Arc<ParkingAgent>,
    curator: Curator,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let curator_filter = warp::any().map(move || curator.clone());

    let summarize_route = warp::path("summarize_parking")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body::<SummarizeRequest>())
        .and(with_agent(agent.clone()))
        .and(curator_filter)
        .and_then(
            |request: SummarizeRequest, agent: Arc<ParkingAgent>, curator: Curator| async move {
                let summary = agent.summarize(&request.detected_spots);
                let curated = curator.curate(summary.low_confidence).await;
                Ok::<_, Rejection>(warp::reply::json(&SummarizeResponse::new(
                    summary.occupancy,
                    curated,
                )))
            },
        );

    let feedback_route = warp::path("curation_feedback")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body::<FeedbackRequest>())
        .and(with_agent(agent.clone()))
        .map(|request: FeedbackRequest, agent: Arc<ParkingAgent>| {
            let ack = agent.record_feedback(&request.feedback);
            warp::reply::json(&StatusReply::new(ack))
        });

    let log_scan_route = warp::path("log_scan")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body::<LogScanRequest>())
        .and(with_agent(agent.clone()))
        .map(|request: LogScanRequest, agent: Arc<ParkingAgent>| {
            agent.ingest(request.user, request.filename, request.predictions);
            warp::reply::json(&StatusReply::new("logged"))
        });

    let stats_route = warp::path("agent_dashboard_stats")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_agent(agent.clone()))
        .map(|agent: Arc<ParkingAgent>| warp::reply::json(&agent.daily_stats()));

    let scan_log_route = warp::path("agent_scan_log")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_agent(agent))
        .map(|agent: Arc<ParkingAgent>| warp::reply::json(&agent.today_scans()));

    preflight()
        .or(summarize_route)
        .or(feedback_route)
        .or(log_scan_route)
        .or(stats_route)
        .or(scan_log_route)
        .with(warp::reply::with::header(
            "access-control-allow-origin",
            ALLOW_ANY,
        ))
}

/// Hosts the agent's HTTP endpoints on a dedicated thread.
pub struct HttpBridge {
    agent: Arc<ParkingAgent>,
    curator: Curator,
}

impl HttpBridge {
    pub fn new(agent: Arc<ParkingAgent>, curator: Curator) -> Self {
        Self { agent, curator }
    }

    pub fn serve(&self, addr: SocketAddr) -> anyhow::Result<thread::JoinHandle<()>> {
        let routes = routes(self.agent.clone(), self.curator.clone());
        let runtime = Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("building runtime for the HTTP bridge")?;
        info!("agent listening on http://{}", addr);
        Ok(thread::spawn(move || {
            runtime.block_on(async move {
                warp::serve(routes).run(addr).await;
            });
        }))
    }

    pub fn publish_status(&self, message: &str) {
        info!("[agent] {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::AgentConfig;
    use chrono::{TimeZone, Utc};
    use parkcore::store::FixedClock;
    use serde_json::{json, Value};

    fn offline_agent() -> (Arc<ParkingAgent>, Curator) {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 8, 20, 12, 0, 0).unwrap(),
        ));
        let agent = Arc::new(ParkingAgent::new(clock));
        let curator = Curator::new(&AgentConfig::default()).unwrap();
        (agent, curator)
    }

    fn body_json(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn summarize_returns_tier_and_curated_spots() {
        let (agent, curator) = offline_agent();
        let api = routes(agent, curator);
        let mut spots = vec![json!({"class": "occupied", "confidence": 0.3}); 9];
        spots.push(json!({"class": "empty"}));

        let response = warp::test::request()
            .method("POST")
            .path("/summarize_parking")
            .json(&json!({ "detectedSpots": spots }))
            .reply(&api)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response.body());
        assert_eq!(
            body["summary"],
            "Parking lot usage: 90.0%. There are still 1 slot(s) open."
        );
        assert_eq!(body["numAvailable"], 1);
        assert_eq!(body["numOccupied"], 9);
        let curated = body["curated_images"].as_array().unwrap();
        assert_eq!(curated.len(), 9);
        assert_eq!(curated[0]["searched_query"], "parking lot occupied");
        assert_eq!(curated[0]["original_spot"]["confidence"], 0.3);
        assert_eq!(curated[0]["fetched_images"], json!([]));
    }

    #[tokio::test]
    async fn summarize_without_spots_reports_no_data() {
        let (agent, curator) = offline_agent();
        let api = routes(agent, curator);
        let response = warp::test::request()
            .method("POST")
            .path("/summarize_parking")
            .json(&json!({}))
            .reply(&api)
            .await;

        let body = body_json(response.body());
        assert_eq!(body["summary"], "No parking data available yet.");
        assert_eq!(body["percentOccupied"], 0.0);
        assert_eq!(body["curated_images"], json!([]));
    }

    #[tokio::test]
    async fn logged_scans_show_up_in_dashboard_stats() {
        let (agent, curator) = offline_agent();
        let api = routes(agent.clone(), curator);

        let response = warp::test::request()
            .method("POST")
            .path("/log_scan")
            .json(&json!({
                "filename": "north-lot.jpg",
                "predictions": [
                    {"class": "empty", "confidence": 0.75},
                    {"class": "occupied", "confidence": 0.25},
                    {"confidence": 1.0}
                ]
            }))
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response.body()), json!({"status": "logged"}));
        assert_eq!(agent.log().all_records()[0].user(), "Guest");

        let response = warp::test::request()
            .method("GET")
            .path("/agent_dashboard_stats")
            .reply(&api)
            .await;
        let body = body_json(response.body());
        assert_eq!(body["scansToday"], 1);
        assert_eq!(body["lowConf"], 1);
        assert_eq!(body["avgConf"], 66);
        assert_eq!(body["topStatuses"], json!(["N/A", "empty", "occupied"]));

        let response = warp::test::request()
            .method("GET")
            .path("/agent_scan_log")
            .reply(&api)
            .await;
        let body = body_json(response.body());
        assert_eq!(body[0]["filename"], "north-lot.jpg");
        assert_eq!(body[0]["breakdown"]["empty"], 1);
        assert_eq!(body[0]["breakdown"]["lowConf"], 1);
        assert_eq!(body[0]["breakdown"]["totalSpots"], 2);
        assert_eq!(body[0]["breakdown"]["occupancyRate"], 50);
    }

    #[tokio::test]
    async fn preflight_grants_any_requested_header() {
        let (agent, curator) = offline_agent();
        let api = routes(agent, curator);
        let response = warp::test::request()
            .method("OPTIONS")
            .path("/agent_dashboard_stats")
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "GET")
            .header("access-control-request-headers", "x-requested-with")
            .reply(&api)
            .await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "GET");
        assert_eq!(headers["access-control-allow-headers"], "x-requested-with");
    }

    #[tokio::test]
    async fn cross_origin_replies_allow_any_origin() {
        let (agent, curator) = offline_agent();
        let api = routes(agent, curator);
        let response = warp::test::request()
            .method("GET")
            .path("/agent_dashboard_stats")
            .header("origin", "http://dashboard.example")
            .header("x-requested-with", "XMLHttpRequest")
            .reply(&api)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn feedback_is_acknowledged() {
        let (agent, curator) = offline_agent();
        let api = routes(agent.clone(), curator);
        let response = warp::test::request()
            .method("POST")
            .path("/curation_feedback")
            .json(&json!({
                "feedback": [{"image_url": "https://img.test/1", "decision": "approve"}]
            }))
            .reply(&api)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response.body()),
            json!({"status": "Feedback received"})
        );
        assert!(agent.log().is_empty());
    }

    #[tokio::test]
    async fn unknown_route_is_rejected() {
        let (agent, curator) = offline_agent();
        let api = routes(agent, curator);
        let response = warp::test::request()
            .method("GET")
            .path("/summarize_parking")
            .reply(&api)
            .await;
        assert!(response.status().is_client_error());
    }
}
