//! 설정 관리.
//!
//! 기본값 → 설정 파일(TOML, 선택) → 환경 변수 순으로 덮어씁니다.
//! 환경 변수는 `COINBOARD_` 접두사와 `__` 구분자를 사용합니다
//! (예: `COINBOARD_MONITOR__INTERVAL_SECS=30`).

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 설정 파일 기본 경로 (확장자 없이, 없으면 무시).
pub const DEFAULT_CONFIG_PATH: &str = "config/coinboard";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP 클라이언트 설정
    pub http: HttpConfig,
    /// Upbit REST 엔드포인트
    pub upbit: EndpointConfig,
    /// Bithumb REST 엔드포인트
    pub bithumb: EndpointConfig,
    /// 외환 환율 API 엔드포인트
    pub forex: EndpointConfig,
    /// 마켓 모니터 설정
    pub monitor: MonitorConfig,
    /// USDT 시세 모니터 설정
    pub usdt: UsdtMonitorConfig,
    /// 외환 모니터 설정
    pub forex_monitor: ForexMonitorConfig,
    /// 파일 내보내기 설정
    pub export: ExportConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// HTTP 클라이언트 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// User-Agent 헤더
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            user_agent: "Mozilla/5.0 (compatible; coinboard/0.1)".to_string(),
        }
    }
}

impl HttpConfig {
    /// 요청 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// REST 엔드포인트 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// 기본 URL (비어 있으면 커넥터 기본값 사용)
    pub base_url: Option<String>,
}

/// 마켓 모니터 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// 갱신 주기 (초)
    pub interval_secs: u64,
    /// 표시할 최대 행 수
    pub display_count: usize,
    /// 요청당 최대 마켓 수. Bithumb은 전체 시세를 한 번에 받으므로 무시됩니다.
    pub batch_size: usize,
    /// 호가 통화
    pub quote: String,
    /// 환산 대상 보조 통화
    pub secondary: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            display_count: 15,
            batch_size: 10,
            quote: "KRW".to_string(),
            secondary: "USDT".to_string(),
        }
    }
}

impl MonitorConfig {
    /// 갱신 주기를 Duration으로 반환
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

/// USDT 시세 모니터 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UsdtMonitorConfig {
    /// 갱신 주기 (초)
    pub interval_secs: u64,
}

impl Default for UsdtMonitorConfig {
    fn default() -> Self {
        Self { interval_secs: 5 }
    }
}

impl UsdtMonitorConfig {
    /// 갱신 주기를 Duration으로 반환
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

/// 외환 모니터 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForexMonitorConfig {
    /// 갱신 주기 (초)
    pub interval_secs: u64,
    /// 기준 통화
    pub base: String,
    /// 표시 통화
    pub quote: String,
}

impl Default for ForexMonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            base: "USD".to_string(),
            quote: "KRW".to_string(),
        }
    }
}

impl ForexMonitorConfig {
    /// 갱신 주기를 Duration으로 반환
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

/// 파일 내보내기 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// 출력 디렉토리
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: "output".to_string(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 기본 경로의 설정 파일(있으면)과 환경 변수에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, ::config::ConfigError> {
        Self::load(None)
    }

    /// 설정을 로드합니다. `path`가 주어지면 해당 파일은 반드시 존재해야 합니다.
    pub fn load(path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        dotenvy::dotenv().ok();

        let file_source = match path {
            Some(path) => ::config::File::from(path).required(true),
            None => ::config::File::with_name(DEFAULT_CONFIG_PATH).required(false),
        };

        let config = ::config::Config::builder()
            .add_source(file_source)
            // 환경 변수로 오버라이드
            .add_source(
                ::config::Environment::with_prefix("COINBOARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
