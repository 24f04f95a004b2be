use pix_core::{
    CustomerProfile, GatewayClient, GatewayError, GatewayIdentity, PaymentRequest, PaymentStatus,
    PlaceholderGenerator, ScriptedRandom, StatusRecord,
};
use pix_gateways::{For4Gateway, NovaEraGateway, ProviderConfig, QuatroMGateway};
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "qm_test_secret_0001";

fn scripted() -> PlaceholderGenerator {
    PlaceholderGenerator::new(Arc::new(ScriptedRandom::new(vec![1, 2, 3, 4, 0])))
}

fn config(gateway: GatewayIdentity, server: &MockServer) -> ProviderConfig {
    ProviderConfig::new(gateway, KEY)
        .unwrap()
        .with_api_base_url(server.uri())
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn quatrom(server: &MockServer) -> QuatroMGateway {
    QuatroMGateway::new(config(GatewayIdentity::QuatroM, server), scripted()).unwrap()
}

#[tokio::test]
async fn test_quatrom_create_unwraps_data_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .and(header("Authorization", format!("Bearer {}", KEY).as_str()))
        .and(body_partial_json(json!({
            "amount": "93.40",
            "customer_name": "José Silva",
            "customer_email": "josésilva1234@gmail.com",
            "customer_cpf": "12345678901",
            "description": "Pagamento via PIX"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {
                "transaction_id": "tx_4m_1",
                "pix_code": "00020126580014br.gov.bcb.pix",
                "pix_qr_code": "data:image/png;base64,iVBOR",
                "expires_at": "2025-06-01T10:30:00Z",
                "status": "PENDING"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = PaymentRequest::new("José Silva", "93.40").with_cpf("123.456.789-01");
    let record = quatrom(&server).create_payment(request).await.unwrap();

    assert_eq!(record.id, "tx_4m_1");
    assert_eq!(record.pix_code.as_deref(), Some("00020126580014br.gov.bcb.pix"));
    assert_eq!(record.pix_qr_code.as_deref(), Some("data:image/png;base64,iVBOR"));
    assert_eq!(record.status, PaymentStatus::Pending);
    assert!(record.expires_at.is_some());
}

#[tokio::test]
async fn test_invalid_amount_never_reaches_provider() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = quatrom(&server);
    for amount in [0.0, -5.0] {
        let err = gateway
            .create_payment(PaymentRequest::new("Ana", amount))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
    }

    let err = gateway
        .create_payment(PaymentRequest::new("", 10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Validation(_)));
}

#[tokio::test]
async fn test_create_401_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
        .mount(&server)
        .await;

    let err = quatrom(&server)
        .create_payment(PaymentRequest::new("Ana", 10.0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GatewayError::Auth {
            gateway: GatewayIdentity::QuatroM
        }
    ));
}

#[tokio::test]
async fn test_create_provider_error_carries_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"errors": ["CPF inválido", "Telefone inválido"]})),
        )
        .mount(&server)
        .await;

    let err = quatrom(&server)
        .create_payment(PaymentRequest::new("Ana", 10.0))
        .await
        .unwrap_err();
    match err {
        GatewayError::Upstream { gateway, message } => {
            assert_eq!(gateway, GatewayIdentity::QuatroM);
            assert_eq!(message, "CPF inválido; Telefone inválido");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_create_malformed_body_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let err = quatrom(&server)
        .create_payment(PaymentRequest::new("Ana", 10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Upstream { .. }));
}

#[tokio::test]
async fn test_create_network_failure_is_upstream_error() {
    let config = ProviderConfig::new(GatewayIdentity::QuatroM, KEY)
        .unwrap()
        .with_api_base_url("http://127.0.0.1:1");
    let gateway = QuatroMGateway::new(config, scripted()).unwrap();

    let err = gateway
        .create_payment(PaymentRequest::new("Ana", 10.0))
        .await
        .unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_status_unknown_transaction_is_pending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/does-not-exist"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let record = quatrom(&server).check_status("does-not-exist").await;
    assert_eq!(record, StatusRecord::pending());
}

#[tokio::test]
async fn test_status_server_error_and_network_failure_are_pending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert_eq!(quatrom(&server).check_status("tx").await, StatusRecord::pending());

    let config = ProviderConfig::new(GatewayIdentity::QuatroM, KEY)
        .unwrap()
        .with_api_base_url("http://127.0.0.1:1");
    let offline = QuatroMGateway::new(config, scripted()).unwrap();
    assert_eq!(offline.check_status("tx").await, StatusRecord::pending());
}

#[tokio::test]
async fn test_status_paid_maps_to_completed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/tx_4m_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "PAID",
            "data": {"id": "tx_4m_1", "pixCode": "000201"}
        })))
        .mount(&server)
        .await;

    let record = quatrom(&server).check_status("tx_4m_1").await;
    assert_eq!(record.status, PaymentStatus::Completed);
    assert_eq!(record.original_status, "PAID");
    assert_eq!(record.transaction_id.as_deref(), Some("tx_4m_1"));
    assert_eq!(record.pix_code.as_deref(), Some("000201"));
}

#[tokio::test]
async fn test_fixed_fee_sends_tariff() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .and(body_partial_json(json!({"amount": "49.70"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "tx_fee"})))
        .expect(1)
        .mount(&server)
        .await;

    let record = quatrom(&server)
        .create_fixed_fee_payment(CustomerProfile::new("Ana", "12345678901"), true)
        .await
        .unwrap();
    assert_eq!(record.id, "tx_fee");
    assert_eq!(record.status, PaymentStatus::Pending);
}

#[tokio::test]
async fn test_for4_create_and_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transaction.purchase"))
        .and(header("Authorization", KEY))
        .and(body_partial_json(json!({"amount": 9340, "paymentMethod": "PIX"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "f4_1",
            "pixCode": "000201f4",
            "pixQrCode": "base64qr",
            "expiresAt": "2025-06-01T10:30:00Z",
            "status": "PENDING"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/transaction.getPayment"))
        .and(query_param("id", "f4_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "f4_1", "status": "APPROVED"})))
        .mount(&server)
        .await;

    let gateway = For4Gateway::new(config(GatewayIdentity::For4, &server), scripted()).unwrap();

    let record = gateway
        .create_payment(PaymentRequest::new("Ana", 93.40))
        .await
        .unwrap();
    assert_eq!(record.id, "f4_1");
    assert_eq!(record.pix_code.as_deref(), Some("000201f4"));

    let status = gateway.check_status("f4_1").await;
    assert_eq!(status.status, PaymentStatus::Completed);
    assert_eq!(status.original_status, "APPROVED");
}

#[tokio::test]
async fn test_novaera_create_uses_basic_auth() {
    let server = MockServer::start().await;

    let expected_auth = ProviderConfig::new(GatewayIdentity::NovaEra, KEY)
        .unwrap()
        .auth_header();

    Mock::given(method("POST"))
        .and(path("/transactions"))
        .and(header("Authorization", expected_auth.as_str()))
        .and(body_partial_json(json!({
            "amount": 4970,
            "paymentMethod": "pix",
            "customer": {"document": {"type": "cpf", "number": "12345678901"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 77,
            "status": "waiting_payment",
            "pix": {"qrcode": "000201ne"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = NovaEraGateway::new(config(GatewayIdentity::NovaEra, &server), scripted()).unwrap();
    let record = gateway
        .create_fixed_fee_payment(CustomerProfile::new("Ana", "123.456.789-01"), true)
        .await
        .unwrap();

    assert_eq!(record.id, "77");
    assert_eq!(record.pix_code.as_deref(), Some("000201ne"));
    assert_eq!(record.status, PaymentStatus::Pending);
}

#[tokio::test]
async fn test_status_id_cannot_leave_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/admin/balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "PAID"})))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/payments/..%2Fadmin%2Fbalance"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let config = ProviderConfig::new(GatewayIdentity::QuatroM, KEY)
        .unwrap()
        .with_api_base_url(format!("{}/api/v1", server.uri()));
    let gateway = QuatroMGateway::new(config, scripted()).unwrap();

    let record = gateway.check_status("../admin/balance").await;
    assert_eq!(record, StatusRecord::pending());
}

#[tokio::test]
async fn test_novaera_status_encodes_slash_in_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transactions/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "a/b", "status": "paid"})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = NovaEraGateway::new(config(GatewayIdentity::NovaEra, &server), scripted()).unwrap();
    let record = gateway.check_status("a/b").await;
    assert_eq!(record.status, PaymentStatus::Completed);
    assert_eq!(record.transaction_id.as_deref(), Some("a/b"));
}

#[tokio::test]
async fn test_blank_or_dot_ids_never_reach_provider() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "PAID"})))
        .expect(0)
        .mount(&server)
        .await;

    let quatrom = quatrom(&server);
    let for4 = For4Gateway::new(config(GatewayIdentity::For4, &server), scripted()).unwrap();
    let novaera = NovaEraGateway::new(config(GatewayIdentity::NovaEra, &server), scripted()).unwrap();

    for id in ["", "  ", ".", ".."] {
        assert_eq!(quatrom.check_status(id).await, StatusRecord::pending());
        assert_eq!(for4.check_status(id).await, StatusRecord::pending());
        assert_eq!(novaera.check_status(id).await, StatusRecord::pending());
    }
}

#[tokio::test]
async fn test_status_non_json_body_is_pending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/tx_html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let record = quatrom(&server).check_status("tx_html").await;
    assert_eq!(record, StatusRecord::pending());
}

#[tokio::test]
async fn test_rejected_credentials_logged_masked() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let err = quatrom(&server)
        .create_payment(PaymentRequest::new("Ana", 10.0).with_cpf("12345678901"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Auth { .. }));

    let logs = buffer.contents();
    assert!(logs.contains("rejected our credentials (key qm_...001)"), "logs: {}", logs);
    assert!(!logs.contains(KEY));
    assert!(!logs.contains("12345678901"));
}
