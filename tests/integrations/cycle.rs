//! Full-cycle behavior: collection order, fault isolation and alerting.

use hostwatch::app::AppBuilder;
use hostwatch::config::Config;
use hostwatch::core::ResourceCategory;
use std::sync::Arc;

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::{fake_runner::FakeRunner, mock_transport::MockTransport, rows, test_identity};

fn test_config() -> Config {
    let mut config = Config::default();
    config.measurement.percent_threshold = 90;
    config
}

fn healthy_runner() -> Arc<FakeRunner> {
    let runner = Arc::new(FakeRunner::new());
    runner.respond("free", rows(&[&["2048", "1024", "1024"]]));
    runner.respond(
        "df",
        rows(&[
            &["/dev/sda1", "100G", "95G", "5G", "95"],
            &["/dev/sda2", "50G", "10G", "40G", "20"],
        ]),
    );
    runner.respond("swapon", rows(&[&["/dev/sdb2", "1000000000", "950000000"]]));
    runner
}

async fn build_monitor(
    config: Config,
    runner: Arc<FakeRunner>,
    transport: Arc<MockTransport>,
) -> hostwatch::monitor::Monitor {
    AppBuilder::new(config)
        .runner_override(runner)
        .transport_override(transport)
        .identity(test_identity())
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn records_are_collected_in_memory_disk_swap_order() {
    let runner = healthy_runner();
    let monitor = build_monitor(test_config(), runner, Arc::new(MockTransport::new())).await;

    let records = monitor.collect_all().await;

    let categories: Vec<ResourceCategory> = records.iter().map(|r| r.category).collect();
    assert_eq!(
        categories,
        vec![
            ResourceCategory::Memory,
            ResourceCategory::Disk,
            ResourceCategory::Disk,
            ResourceCategory::Swap,
        ]
    );
}

#[tokio::test]
async fn swap_records_are_merged_like_the_other_collectors() {
    let runner = healthy_runner();
    let monitor = build_monitor(test_config(), runner, Arc::new(MockTransport::new())).await;

    let records = monitor.collect_all().await;
    assert!(records
        .iter()
        .any(|r| r.category == ResourceCategory::Swap && r.label == "/dev/sdb2"));
}

#[tokio::test]
async fn one_alert_is_sent_per_critical_record() {
    let runner = healthy_runner();
    let transport = Arc::new(MockTransport::new());
    let monitor = build_monitor(test_config(), runner, transport.clone()).await;

    // disk /dev/sda1 at 95% and swap at 95% cross the threshold of 90
    let summary = monitor.run_cycle().await.unwrap();

    assert_eq!(summary.records.len(), 4);
    assert_eq!(summary.critical, 2);
    assert_eq!(summary.alerts_sent, 2);
    assert_eq!(transport.attempts(), 2);

    let sent = transport.sent();
    assert!(sent[0].contains("partition: /dev/sda1"));
    assert!(sent[1].contains("partition: /dev/sdb2"));
}

#[tokio::test]
async fn transport_failure_does_not_suppress_remaining_alerts() {
    let runner = healthy_runner();
    let transport = Arc::new(MockTransport::new());
    transport.fail_on(0);
    let monitor = build_monitor(test_config(), runner, transport.clone()).await;

    let summary = monitor.run_cycle().await.unwrap();

    assert_eq!(summary.critical, 2);
    assert_eq!(summary.alerts_sent, 1);
    assert_eq!(transport.attempts(), 2);
    assert!(transport.sent()[0].contains("partition: /dev/sdb2"));
}

#[tokio::test]
async fn a_failing_collector_does_not_stop_the_others() {
    let runner = healthy_runner();
    runner.fail("df");
    let monitor = build_monitor(test_config(), runner, Arc::new(MockTransport::new())).await;

    let records = monitor.collect_all().await;

    assert!(records.iter().all(|r| r.category != ResourceCategory::Disk));
    assert!(records.iter().any(|r| r.category == ResourceCategory::Memory));
    assert!(records.iter().any(|r| r.category == ResourceCategory::Swap));
}

#[tokio::test]
async fn disabled_collectors_never_run_their_command() {
    let runner = healthy_runner();
    let mut config = test_config();
    config.monitoring.disk = false;
    config.monitoring.swap = false;
    let monitor = build_monitor(config, runner.clone(), Arc::new(MockTransport::new())).await;

    let records = monitor.collect_all().await;

    assert!(records.iter().all(|r| r.category == ResourceCategory::Memory));
    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].contains("free"));
}

#[tokio::test(start_paused = true)]
async fn the_pause_between_cycles_is_fixed_even_when_a_cycle_overruns() {
    use std::time::Duration;
    use tokio::sync::watch;
    use tokio::time::Instant;

    // One collector whose command takes longer than the interval.
    let runner = Arc::new(FakeRunner::new());
    runner.respond("free", rows(&[&["2048", "512", "1536"]]));
    runner.set_delay(Duration::from_secs(1000));

    let mut config = test_config();
    config.monitoring.disk = false;
    config.monitoring.swap = false;
    config.scheduler.interval_seconds = 600;

    let monitor = AppBuilder::new(config)
        .runner_override(runner)
        .transport_override(Arc::new(MockTransport::new()))
        .identity(test_identity())
        .max_cycles(Some(2))
        .build()
        .await
        .unwrap();

    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let start = Instant::now();
    monitor.run(shutdown_rx).await;

    // cycle (1000s) + full sleep (600s) + cycle (1000s): a start-to-start
    // schedule would have begun the second cycle immediately at 1000s.
    assert!(start.elapsed() >= Duration::from_secs(2600));
}

#[tokio::test]
async fn a_quiet_cycle_sends_no_alerts() {
    let runner = Arc::new(FakeRunner::new());
    runner.respond("free", rows(&[&["2048", "512", "1536"]]));
    runner.respond("df", rows(&[&["/dev/sda1", "100G", "10G", "90G", "10"]]));
    runner.respond("swapon", rows(&[]));

    let transport = Arc::new(MockTransport::new());
    let monitor = build_monitor(test_config(), runner, transport.clone()).await;

    let summary = monitor.run_cycle().await.unwrap();
    assert_eq!(summary.critical, 0);
    assert_eq!(summary.alerts_sent, 0);
    assert_eq!(transport.attempts(), 0);
}
