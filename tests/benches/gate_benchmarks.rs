//! # Session-Gate Benchmarks
//!
//! | Subsystem | Operation | Target |
//! |-----------|-----------|--------|
//! | sg-01 Rate Limiter | check_and_consume | < 1µs |
//! | sg-02 OTP Store | issue + check | < 10µs |
//! | sg-03 Launch Token | mint, verify | < 20µs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sg_01_rate_limiter::{
    ActionLimit, RateLimitConfig, RateLimiterApi, RateLimiterService, OTP_REQUEST,
};
use sg_02_otp_store::{OsDigitSource, OtpConfig, OtpStoreApi, OtpStoreService};
use sg_03_launch_token::{DeployToken, LaunchTokenApi, LaunchTokenService, TokenConfig};
use shared_types::{Identity, PhoneNumber, SystemTimeSource};

// ============================================================================
// SG-01: Rate Limiter
// ============================================================================

fn bench_rate_limiter(c: &mut Criterion) {
    let mut group = c.benchmark_group("sg-01-rate-limiter");

    for identities in [100u64, 10_000] {
        // Unlimited requests per window so every call takes the consume path
        let config =
            RateLimitConfig::empty().with_limit(OTP_REQUEST, ActionLimit::new(u32::MAX, 300));
        let limiter = RateLimiterService::new(config, SystemTimeSource);
        let ids: Vec<Identity> = (0..identities).map(Identity::from).collect();

        group.throughput(Throughput::Elements(identities));
        group.bench_with_input(
            BenchmarkId::new("check_and_consume", identities),
            &ids,
            |b, ids| {
                b.iter(|| {
                    for id in ids {
                        black_box(limiter.check_and_consume(id, OTP_REQUEST));
                    }
                })
            },
        );
    }

    group.finish();
}

// ============================================================================
// SG-02: OTP Store
// ============================================================================

fn bench_otp_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("sg-02-otp-store");
    let store = OtpStoreService::new(OtpConfig::default(), SystemTimeSource, OsDigitSource);
    let id = Identity::from(42u64);
    let phone = PhoneNumber::parse("+15551234567").expect("valid phone");

    group.bench_function("issue_then_check", |b| {
        b.iter(|| {
            let code = store.issue(&id, &phone).expect("issue");
            black_box(store.check(&id, code.as_str()))
        })
    });

    group.finish();
}

// ============================================================================
// SG-03: Launch Token
// ============================================================================

fn bench_launch_token(c: &mut Criterion) {
    let mut group = c.benchmark_group("sg-03-launch-token");
    let service = LaunchTokenService::new(
        &DeployToken::new("123456:bench-deploy-token").expect("token"),
        TokenConfig::default(),
        SystemTimeSource,
    )
    .expect("service");
    let id = Identity::from(42u64);
    let token = service.mint(&id);

    group.bench_function("mint", |b| b.iter(|| black_box(service.mint(&id))));
    group.bench_function("verify", |b| {
        b.iter(|| black_box(service.verify(&token, &id).is_valid()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_rate_limiter,
    bench_otp_store,
    bench_launch_token
);
criterion_main!(benches);
