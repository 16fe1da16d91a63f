use chrono::{TimeZone, Utc};
use compartment_paths::identity::{OciProfile, RequestSigner};
use reqwest::Url;

use crate::integration::support::{fixture_path, fixture_signer, FINGERPRINT, TENANCY, USER};

/// PKCS#1 v1.5 signature of the sample signing string with tests/fixtures/test_key.pem.
const EXPECTED_SIGNATURE: &str = "PTc1NPxwl9mCe4PgVS4X2PgdvnR57NbqlzVDvO6TttIJui6MaEKC2a5TGy0sMB4KgalM55F+n901fsMsGdj1McK3YvnBo2ivYRaA5JXcM8+kGEaN4vjtcwSZ/4dZQaboEmILi/P6yr7LG3C85yCkXL44WCoXNM8pHLCSCWn+Zi1UJEnSzAajROpQqcQPsERiNxH6phWfGZpFfj+nXx50wifm2Xzq7ZKwLwo2ppcWCrDmpg1GK9BxyBxpFqB/Zh+qYKi++72aPc+Iim6K6pwQ1sifkJIPMoIfcZSB/ABN/3TS9i53DFXXIj4SuN6fZ24KGNFZ56bLn+DtZwd6nuvfNg==";

fn sample_url() -> Url {
    Url::parse_with_params(
        "https://identity.us-ashburn-1.oraclecloud.com/20160918/compartments",
        &[
            ("compartmentId", "ocid1.tenancy.oc1..aaaa"),
            ("compartmentIdInSubtree", "true"),
            ("accessLevel", "ANY"),
        ],
    )
    .unwrap()
}

fn sample_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2014, 1, 5, 21, 31, 40).unwrap()
}

#[test]
fn signature_matches_known_value() {
    let signed = fixture_signer()
        .sign("GET", &sample_url(), sample_time())
        .unwrap();

    assert_eq!(signed.date, "Sun, 05 Jan 2014 21:31:40 GMT");
    assert_eq!(signed.host, "identity.us-ashburn-1.oraclecloud.com");
    assert_eq!(
        signed.authorization,
        format!(
            "Signature version=\"1\",keyId=\"{}/{}/{}\",algorithm=\"rsa-sha256\",headers=\"date (request-target) host\",signature=\"{}\"",
            TENANCY, USER, FINGERPRINT, EXPECTED_SIGNATURE
        )
    );
}

#[test]
fn pkcs8_key_signs_identically() {
    let path = fixture_path("test_key_pkcs8.pem");
    let pem = std::fs::read_to_string(&path).unwrap();
    let signer = RequestSigner::from_pem("key".to_string(), &pem, &path).unwrap();

    let signed = signer.sign("GET", &sample_url(), sample_time()).unwrap();
    assert!(signed
        .authorization
        .ends_with(&format!("signature=\"{}\"", EXPECTED_SIGNATURE)));
}

#[test]
fn signer_loads_key_named_by_profile() {
    let profile = OciProfile {
        name: "DEFAULT".to_string(),
        user: USER.to_string(),
        fingerprint: FINGERPRINT.to_string(),
        key_file: fixture_path("test_key.pem"),
        tenancy: TENANCY.to_string(),
        region: "us-ashburn-1".to_string(),
        pass_phrase: None,
    };
    let signer = RequestSigner::from_profile(&profile).unwrap();
    assert_eq!(signer.key_id(), profile.key_id());
}

#[test]
fn missing_key_file_is_reported_with_path() {
    let profile = OciProfile {
        name: "DEFAULT".to_string(),
        user: USER.to_string(),
        fingerprint: FINGERPRINT.to_string(),
        key_file: fixture_path("no_such_key.pem"),
        tenancy: TENANCY.to_string(),
        region: "us-ashburn-1".to_string(),
        pass_phrase: None,
    };
    let err = RequestSigner::from_profile(&profile).unwrap_err();
    assert!(err.to_string().contains("no_such_key.pem"));
}
