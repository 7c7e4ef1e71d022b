//! 마켓 목록 내보내기와 비교 통합 테스트

use std::fs;
use std::path::PathBuf;

use chrono::{Local, TimeZone};
use coinboard_cli::commands::diff::{diff_markets, read_coin_records, DiffRequest};
use coinboard_cli::commands::export_markets::export_markets;
use coinboard_cli::commands::Venue;
use coinboard_core::config::HttpConfig;
use coinboard_exchange::{BithumbClient, UpbitClient};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("coinboard-{}-{}", name, uuid::Uuid::new_v4()))
}

#[tokio::test]
async fn test_export_then_diff() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/market/all")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"market":"KRW-BTC","korean_name":"비트코인","english_name":"Bitcoin"},
                {"market":"KRW-ETH","korean_name":"이더리움","english_name":"Ethereum"},
                {"market":"KRW-SAND","korean_name":"샌드박스","english_name":"The Sandbox"},
                {"market":"USDT-BTC","korean_name":"비트코인","english_name":"Bitcoin"}
            ]"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/public/ticker/ALL_KRW")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"status":"0000","data":{
                "BTC":{"closing_price":"135000000"},
                "ETH":{"closing_price":"4500000"},
                "WEMIX":{"closing_price":"1200"},
                "date":"1717000000000"
            }}"#,
        )
        .create_async()
        .await;

    let http = HttpConfig::default();
    let upbit = UpbitClient::new(&http, Some(&server.url())).unwrap();
    let bithumb = BithumbClient::new(&http, Some(&server.url())).unwrap();

    let dir = temp_dir("export");
    let at = Local.with_ymd_and_hms(2025, 4, 30, 15, 9, 54).unwrap();

    let upbit_export = export_markets(&upbit, Venue::Upbit, "KRW", &dir, at)
        .await
        .unwrap();
    let bithumb_export = export_markets(&bithumb, Venue::Bithumb, "krw", &dir, at)
        .await
        .unwrap();

    assert_eq!(upbit_export.count, 3);
    assert!(upbit_export
        .path
        .ends_with("upbit_krw_pairs_20250430_150954.csv"));
    assert_eq!(bithumb_export.count, 3);

    let upbit_csv = fs::read_to_string(&upbit_export.path).unwrap();
    assert!(upbit_csv.starts_with("market,korean_name,english_name\n"));
    assert!(upbit_csv.contains("KRW-BTC,비트코인,Bitcoin\n"));

    let bithumb_csv = fs::read_to_string(&bithumb_export.path).unwrap();
    assert!(bithumb_csv.starts_with("market,currency,korean_name,english_name\n"));
    assert!(bithumb_csv.contains("KRW-WEMIX,WEMIX,,\n"));

    let records = read_coin_records(&bithumb_export.path).unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.korean_name.is_none()));

    let request = DiffRequest {
        left: upbit_export.path.clone(),
        right: bithumb_export.path.clone(),
        left_label: "Upbit".to_string(),
        right_label: "Bithumb".to_string(),
        output_dir: dir.clone(),
        prefix: "upbit_bithumb_krw".to_string(),
    };
    let summary = diff_markets(&request).unwrap();

    let coins = |records: &[coinboard_core::CoinRecord]| {
        records.iter().map(|r| r.coin.clone()).collect::<Vec<_>>()
    };
    assert_eq!(coins(&summary.diff.both), vec!["BTC", "ETH"]);
    assert_eq!(coins(&summary.diff.left_only), vec!["SAND"]);
    assert_eq!(coins(&summary.diff.right_only), vec!["WEMIX"]);

    assert!(summary
        .left_only_path
        .ends_with("upbit_bithumb_krw_only_upbit.csv"));
    let both_csv = fs::read_to_string(&summary.both_path).unwrap();
    assert_eq!(
        both_csv,
        "coin,korean_name,english_name\nBTC,비트코인,Bitcoin\nETH,이더리움,Ethereum\n"
    );

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_diff_missing_file_is_error() {
    let dir = temp_dir("diff-missing");
    let request = DiffRequest {
        left: dir.join("nope_left.csv"),
        right: dir.join("nope_right.csv"),
        left_label: "left".to_string(),
        right_label: "right".to_string(),
        output_dir: dir.clone(),
        prefix: "cmp".to_string(),
    };
    assert!(diff_markets(&request).is_err());
}
