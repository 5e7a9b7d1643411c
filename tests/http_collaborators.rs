mod common;

use common::{directions, directions_body, home, HOME_TO_RAMP};
use leetroute::sdk::export::{export_route, BlobSink, ExportError, ExportSettings, Sink};
use leetroute::sdk::geo::{Location, Point};
use leetroute::sdk::routing::{
    provider::AlternativeRoutes, DirectionsOptions, Geocoder, OrsProvider, PhotonGeocoder,
    RoutingError, RoutingProvider, Units,
};
use leetroute::sdk::util::rate_limit;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// The blocking clients own a runtime of their own, so they are driven from a
// blocking task while the mock server runs on the test runtime.

#[tokio::test(flavor = "multi_thread")]
async fn blob_sink_uploads_with_storage_headers() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/exports/route.kml"))
        .and(header("authorization", "Bearer vercel_blob_rw_test"))
        .and(header("x-api-version", "7"))
        .and(header("x-content-type", "application/vnd.google-earth.kml+xml"))
        .and(header("x-add-random-suffix", "0"))
        .and(header("x-allow-overwrite", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://store.public.blob.vercel-storage.com/exports/route.kml",
            "pathname": "exports/route.kml"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let locator = tokio::task::spawn_blocking(move || {
        let sink = BlobSink::new("vercel_blob_rw_test".to_string())?.with_base_url(&uri);
        sink.prepare()?;
        sink.put("route.kml", b"<kml/>")
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(locator, "https://store.public.blob.vercel-storage.com/exports/route.kml");
}

#[tokio::test(flavor = "multi_thread")]
async fn blob_export_keeps_one_blob_per_format_for_awkward_names() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(|req: &wiremock::Request| {
            ResponseTemplate::new(200).set_body_json(json!({
                "url": format!("https://store.public.blob.vercel-storage.com{}", req.url.path())
            }))
        })
        .expect(3)
        .mount(&server)
        .await;

    let uri = server.uri();
    let locators = tokio::task::spawn_blocking(move || {
        let directions = directions(&HOME_TO_RAMP);
        let suite = Location::new(Point::new(42.968, -85.6666), "Suite #200");
        let sink = BlobSink::new("vercel_blob_rw_test".to_string())?.with_base_url(&uri);
        export_route(directions.primary().unwrap(), &home(), &suite, &sink, &ExportSettings::default())
    })
    .await
    .unwrap()
    .unwrap();

    let mut paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|req| req.url.path().to_string())
        .collect();
    paths.sort();
    assert_eq!(
        paths,
        [
            "/exports/route_from_Home_to_Suite__200.gpx",
            "/exports/route_from_Home_to_Suite__200.kml",
            "/exports/route_from_Home_to_Suite__200_data.json",
        ]
    );
    assert_ne!(locators.kml, locators.gpx);
    assert_ne!(locators.gpx, locators.json);
    assert!(locators.kml.ends_with(".kml"));
}

#[tokio::test(flavor = "multi_thread")]
async fn blob_sink_percent_encodes_keys() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/exports/notes%20%231.kml"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": "https://blob/notes-1.kml"})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let locator = tokio::task::spawn_blocking(move || {
        BlobSink::new("vercel_blob_rw_test".to_string())?
            .with_base_url(&uri)
            .put("notes #1.kml", b"<kml/>")
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(locator, "https://blob/notes-1.kml");
}

#[tokio::test(flavor = "multi_thread")]
async fn blob_sink_reports_rejected_uploads() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(403).set_body_string("{\"error\":{\"code\":\"forbidden\"}}"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = tokio::task::spawn_blocking(move || {
        BlobSink::new("bad".to_string())?
            .with_base_url(&uri)
            .put("route.gpx", b"<gpx/>")
    })
    .await
    .unwrap()
    .unwrap_err();

    match err {
        ExportError::SinkWrite { key, reason } => {
            assert_eq!(key, "route.gpx");
            assert!(reason.contains("403"), "{}", reason);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn ors_provider_sends_lon_lat_and_ingests_the_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-car"))
        .and(body_partial_json(json!({
            "coordinates": [[-85.4587, 42.7196], [-85.6666, 42.968]],
            "units": "km",
            "alternative_routes": {"target_count": 2}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(directions_body(&HOME_TO_RAMP)))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let directions = tokio::task::spawn_blocking(move || {
        let provider = OrsProvider::local(uri, "leetRoute/test")?;
        let options = DirectionsOptions {
            units: Units::Kilometers,
            alternative_routes: Some(AlternativeRoutes::default()),
            ..Default::default()
        };
        provider.get_directions(Point::new(42.7196, -85.4587), Point::new(42.968, -85.6666), &options)
    })
    .await
    .unwrap()
    .unwrap();

    let route = directions.primary().unwrap();
    assert_eq!(route.polyline, HOME_TO_RAMP.to_vec());
    assert_eq!(route.steps().count(), HOME_TO_RAMP.len() - 1);
    assert_eq!(directions.metadata["service"], "routing");
}

#[tokio::test(flavor = "multi_thread")]
async fn ors_provider_sends_the_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "ors-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(directions_body(&HOME_TO_RAMP)))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        let provider = OrsProvider::remote("ors-key".to_string(), rate_limit::ors_limiter(), "leetRoute/test")?
            .with_base_url(&uri);
        provider.get_directions(Point::new(0.0, 0.0), Point::new(0.1, 0.1), &DirectionsOptions::default())
    })
    .await
    .unwrap()
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn ors_provider_maps_unroutable_points() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": 2010, "message": "Could not find routable point within a radius of 350.0 meters"}
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = tokio::task::spawn_blocking(move || {
        let provider = OrsProvider::local(uri, "leetRoute/test")?;
        provider.get_directions(Point::new(0.0, 0.0), Point::new(0.1, 0.1), &DirectionsOptions::default())
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(err, RoutingError::UnroutablePoint));
}

#[tokio::test(flavor = "multi_thread")]
async fn ors_provider_rejects_broken_geometry() {
    let server = MockServer::start().await;
    let mut body = directions_body(&HOME_TO_RAMP);
    body["routes"][0]["geometry"] = json!("_p~iF~ps|U_u");
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = tokio::task::spawn_blocking(move || {
        let provider = OrsProvider::local(uri, "leetRoute/test")?;
        provider.get_directions(Point::new(0.0, 0.0), Point::new(0.1, 0.1), &DirectionsOptions::default())
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(err, RoutingError::MalformedResponse(_)), "{}", err);
}

#[tokio::test(flavor = "multi_thread")]
async fn photon_reverse_sends_lat_and_lon_unswapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("lat", "42.968"))
        .and(query_param("lon", "-85.6666"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-85.6666, 42.968]},
                "properties": {"name": "GRCC Parking Ramp A", "city": "Grand Rapids", "osm_value": "parking"}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let places = tokio::task::spawn_blocking(move || {
        let geocoder = PhotonGeocoder::new(&uri, "leetRoute/test", rate_limit::photon_limiter())?;
        geocoder.reverse(Point::new(42.968, -85.6666), 1)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name, "GRCC Parking Ramp A Grand Rapids Parking");
    assert_eq!(places[0].coords, Point::new(42.968, -85.6666));
}

#[tokio::test(flavor = "multi_thread")]
async fn photon_search_passes_query_and_bias() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("q", "grcc ramp"))
        .and(query_param("limit", "5"))
        .and(query_param("lat", "42.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let places = tokio::task::spawn_blocking(move || {
        let geocoder = PhotonGeocoder::new(&uri, "leetRoute/test", rate_limit::photon_limiter())?;
        geocoder.search("grcc ramp", 5, Some(Point::new(42.7, -85.4)))
    })
    .await
    .unwrap()
    .unwrap();

    assert!(places.is_empty());
}
