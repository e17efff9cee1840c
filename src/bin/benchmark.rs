use chrono::{Duration as ChronoDuration, Timelike, Utc};
use colored::*;
use governor::{Quota, RateLimiter};
use hdrhistogram::Histogram;
use reqwest::{Client, StatusCode};
use serde_json::json;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use uuid::Uuid;

const DURATION_SECS: u64 = 20;
const BASE_URL: &str = "http://localhost:3000";
const CONTENDERS: usize = 50;

struct Target {
    name: &'static str,
    url: String,
}

#[tokio::main]
async fn main() {
    println!("{}", "🚀 Starting Scheduling Benchmark".bold().green());
    println!("Target URL: {}", BASE_URL);

    let client = Client::builder()
        .pool_max_idle_per_host(1000)
        .timeout(Duration::from_secs(10))
        .cookie_store(true)
        .build()
        .expect("Failed to build HTTP client");

    if client.get(format!("{}/health", BASE_URL)).send().await.is_err() {
        eprintln!("{}", "❌ Server is NOT reachable at localhost:3000. Please start it first.".red().bold());
        return;
    }

    println!("\n{}", "⚙️  Setting up benchmark host...".yellow());
    let username = setup_host(&client).await;
    println!("{}", "✅ Host created successfully.".green());
    println!("   Username: {}", username);

    run_contention(&client, &username).await;

    let tomorrow = (Utc::now() + ChronoDuration::days(1)).format("%Y-%m-%d");
    let targets = vec![
        Target {
            name: "Health Check",
            url: format!("{}/health", BASE_URL),
        },
        Target {
            name: "Month Grid",
            url: format!("{}/api/v1/users/{}/calendar", BASE_URL, username),
        },
        Target {
            name: "Day Availability",
            url: format!("{}/api/v1/users/{}/availability?date={}", BASE_URL, username, tomorrow),
        },
    ];

    let rps_stages = vec![10, 50, 200, 1000];

    for target in targets {
        println!("\n{}", "=".repeat(60));
        println!("Benchmarking Endpoint: {}", target.name.cyan().bold());
        println!("URL: {}", target.url);
        println!("{}", "=".repeat(60));

        println!("{:<10} | {:<15} | {:<15} | {:<15}", "RPS", "Mean (ms)", "P99 (ms)", "Success Rate");
        println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<15}", "", "", "", "");

        for &rps in &rps_stages {
            run_stage(&client, &target, rps).await;
        }
    }
}

/// Registers a host working around the clock so every future hour is bookable.
async fn setup_host(client: &Client) -> String {
    let username = format!("bench-{}", &Uuid::new_v4().simple().to_string()[..12]);

    let res = client.post(format!("{}/api/v1/users", BASE_URL))
        .json(&json!({ "name": "Benchmark Host", "username": username }))
        .send()
        .await
        .expect("Failed to send registration request");

    if !res.status().is_success() {
        panic!("Failed to register host: status {}", res.status());
    }

    let intervals: Vec<_> = (0..7)
        .map(|day| json!({ "week_day": day, "start_time_in_minutes": 0, "end_time_in_minutes": 1440 }))
        .collect();

    let res = client.post(format!("{}/api/v1/users/time-intervals", BASE_URL))
        .json(&json!({ "intervals": intervals }))
        .send()
        .await
        .expect("Failed to set time intervals");

    if !res.status().is_success() {
        let status = res.status();
        let txt = res.text().await.unwrap_or_default();
        panic!("Failed to set intervals. Status: {}. Body: {}", status, txt);
    }

    username
}

/// Fires concurrent bookings at one slot. Exactly one should win.
async fn run_contention(client: &Client, username: &str) {
    println!("\n{}", "=".repeat(60));
    println!("Slot contention: {} concurrent bookings", CONTENDERS.to_string().cyan().bold());
    println!("{}", "=".repeat(60));

    let slot = (Utc::now() + ChronoDuration::days(2))
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .expect("valid slot time");

    let url = format!("{}/api/v1/users/{}/schedule", BASE_URL, username);
    let mut set = JoinSet::new();

    for i in 0..CONTENDERS {
        let client = client.clone();
        let url = url.clone();
        let body = json!({
            "name": format!("Guest {}", i),
            "email": format!("guest{}@example.com", i),
            "date": slot.to_rfc3339(),
        });
        set.spawn(async move {
            client.post(&url).json(&body).send().await.map(|r| r.status())
        });
    }

    let (mut created, mut conflicts, mut other) = (0, 0, 0);
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(Ok(StatusCode::CREATED)) => created += 1,
            Ok(Ok(StatusCode::CONFLICT)) => conflicts += 1,
            _ => other += 1,
        }
    }

    println!("Created: {}  Conflicts: {}  Other: {}", created, conflicts, other);
    if created == 1 && other == 0 {
        println!("{}", "✅ Slot was booked exactly once.".green().bold());
    } else {
        println!("{}", "❌ Unexpected contention outcome.".red().bold());
    }
}

async fn run_stage(client: &Client, target: &Target, rps: u32) {
    let Some(per_second) = NonZeroU32::new(rps) else {
        return;
    };
    let limiter = Arc::new(RateLimiter::direct(Quota::per_second(per_second)));

    let (tx, mut rx) = mpsc::channel(50000);
    let start_time = Instant::now();
    let duration = Duration::from_secs(DURATION_SECS);

    loop {
        if start_time.elapsed() > duration {
            break;
        }

        if limiter.check().is_ok() {
            let client = client.clone();
            let url = target.url.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let req_start = Instant::now();
                let res = client.get(&url).send().await;
                let latency = req_start.elapsed();

                let success = match res {
                    Ok(r) => r.status().is_success(),
                    Err(_) => false,
                };

                let _ = tx.send((latency, success)).await;
            });
        } else {
            tokio::task::yield_now().await;
        }
    }

    drop(tx);

    let mut histogram = Histogram::<u64>::new(3).expect("valid histogram precision");
    let mut successes = 0;
    let mut total = 0;

    while let Some((latency, success)) = rx.recv().await {
        total += 1;
        if success { successes += 1; }
        let _ = histogram.record(latency.as_micros() as u64);
    }

    let mean_ms = histogram.mean() / 1000.0;
    let p99_ms = histogram.value_at_quantile(0.99) as f64 / 1000.0;
    let success_rate = if total > 0 { (successes as f64 / total as f64) * 100.0 } else { 0.0 };

    println!(
        "{:<10} | {:<15.2} | {:<15.2} | {:<14.1}%",
        rps,
        mean_ms,
        p99_ms,
        success_rate
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
}
