//! HTTPプローバー
//!
//! 1つのURLにGETを1回送り、到達可否だけを判定する。
//! HTTPステータスコードは見ない（4xx/5xxでも応答があれば到達可能）。

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// プローブのデフォルトタイムアウト（ミリ秒）
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 3000;

/// プローブ結果
///
/// `Err`はプローブ呼び出し自体の失敗を表し、ポーラー側で到達不可として扱われる。
pub type ProbeResult = Result<bool, Box<dyn std::error::Error + Send + Sync>>;

/// 到達可否を判定するプローバー
#[async_trait]
pub trait Prober: Send + Sync {
    /// URLに到達できるか判定する
    async fn probe(&self, url: &str) -> ProbeResult;
}

/// reqwestによるHTTP GETプローバー
#[derive(Clone)]
pub struct HttpProber {
    client: Client,
    timeout: Duration,
}

impl HttpProber {
    /// タイムアウトを指定してプローバーを作成
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }

    /// 設定されたタイムアウト
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// URLにGETを送り、通信が完了すれば`true`を返す
    ///
    /// タイムアウト・接続失敗・不正なURLなど、いずれの失敗でも`false`を返し、
    /// エラーを外へ伝播しない。
    pub async fn probe_url(&self, url: &str) -> bool {
        match self.client.get(url).timeout(self.timeout).send().await {
            Ok(response) => {
                debug!(url, status = %response.status(), "Probe completed");
                true
            }
            Err(e) => {
                debug!(url, timed_out = e.is_timeout(), error = %e, "Probe failed");
                false
            }
        }
    }
}

impl Default for HttpProber {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS))
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, url: &str) -> ProbeResult {
        Ok(self.probe_url(url).await)
    }
}
