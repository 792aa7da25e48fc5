//! Shared harness for the HTTP integration tests.
//!
//! The app is assembled the way the server assembles it, with in-memory
//! guests, a recording RSVP gateway and the real postal-code adapter pointed
//! at a stub upstream.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::{HttpRequest, HttpResponse, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use invitation::domain::ports::{FixtureGuestRepository, RsvpGateway, RsvpGatewayError};
use invitation::domain::{
    ErrorLogger, EventSelectionService, GuestInvites, GuestRecord, InviteType, RsvpSubmission,
    RuntimeEnvironment,
};
use invitation::inbound::http::state::{HttpState, HttpStatePorts};
use invitation::outbound::postal_code::{PostalCodeCredentials, PostalCodeHttpSource, TokenCache};
use invitation::test_support::{MutableClock, StubServer, spawn_stub};

/// Gateway remembering every submission it accepts.
#[derive(Default)]
pub struct RecordingRsvpGateway {
    submissions: Mutex<Vec<RsvpSubmission>>,
}

impl RecordingRsvpGateway {
    pub fn names(&self) -> Vec<String> {
        self.submissions
            .lock()
            .expect("submissions lock")
            .iter()
            .map(|submission| submission.name.clone())
            .collect()
    }
}

#[async_trait]
impl RsvpGateway for RecordingRsvpGateway {
    async fn submit(&self, submission: &RsvpSubmission) -> Result<Value, RsvpGatewayError> {
        self.submissions
            .lock()
            .expect("submissions lock")
            .push(submission.clone());
        Ok(json!({ "result": "success", "row": 2 }))
    }
}

pub fn guests() -> Vec<GuestRecord> {
    vec![
        GuestRecord {
            id: "guest-ceremony".to_owned(),
            name: "佐藤 一郎".to_owned(),
            invite: GuestInvites::from_types(&[InviteType::Reception, InviteType::Ceremony]),
        },
        GuestRecord {
            id: "guest-empty".to_owned(),
            name: "鈴木 次郎".to_owned(),
            invite: GuestInvites::Listed(Vec::new()),
        },
    ]
}

/// Stub postal-code upstream: one known code, one code answering 404.
pub fn spawn_postal_code_upstream() -> StubServer {
    spawn_stub(|cfg| {
        cfg.route(
            "/api/v1/j/token",
            web::post().to(|| async {
                HttpResponse::Ok().json(json!({ "token": "token-it", "expires_in": 600 }))
            }),
        )
        .route(
            "/api/v1/searchcode/{code}",
            web::get().to(|req: HttpRequest, path: web::Path<String>| async move {
                let authorised = req
                    .headers()
                    .get("authorization")
                    .is_some_and(|value| value == "Bearer token-it");
                if !authorised {
                    return HttpResponse::Unauthorized().finish();
                }
                match path.into_inner().as_str() {
                    "1000001" => HttpResponse::Ok().json(json!({
                        "addresses": [{
                            "zip_code": "1000001",
                            "pref_name": "東京都",
                            "city_name": "千代田区",
                            "town_name": "千代田"
                        }],
                        "searchtype": "zipcode",
                        "limit": 10,
                        "count": 1,
                        "page": 1
                    })),
                    _ => HttpResponse::NotFound().json(json!({ "message": "not found" })),
                }
            }),
        );
    })
    .expect("spawn postal code upstream")
}

pub struct Harness {
    pub state: web::Data<HttpState>,
    pub rsvp: Arc<RecordingRsvpGateway>,
    pub upstream: StubServer,
}

pub fn harness() -> Harness {
    let upstream = spawn_postal_code_upstream();
    let logger = ErrorLogger::new(RuntimeEnvironment::Test);
    let clock = Arc::new(MutableClock::new(chrono::Utc::now()));
    let postal_codes = PostalCodeHttpSource::new(
        upstream.base_url.clone(),
        PostalCodeCredentials {
            client_id: "client-it".to_owned(),
            secret_key: "secret-it".to_owned(),
        },
        Arc::new(TokenCache::new(clock)),
        Duration::from_secs(5),
    )
    .expect("postal code source");
    let rsvp = Arc::new(RecordingRsvpGateway::default());
    let ports = HttpStatePorts {
        events: EventSelectionService::new(Arc::new(FixtureGuestRepository::new(guests())), logger),
        postal_codes: Arc::new(postal_codes),
        rsvp: rsvp.clone(),
    };
    Harness {
        state: web::Data::new(HttpState::new(ports, logger)),
        rsvp,
        upstream,
    }
}
