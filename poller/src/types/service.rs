//! 監視対象サービスの型定義

use chrono::{DateTime, Local, SubsecRound};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// サービスの稼働状態
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceStatus {
    /// 初期状態（未プローブ、またはURL変更直後）
    #[default]
    Unknown,
    /// 到達可能
    Ok,
    /// 到達不可（タイムアウト・接続失敗を含む）
    Failed,
}

impl ServiceStatus {
    /// ServiceStatusを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Ok => "OK",
            Self::Failed => "FAILED",
        }
    }

    /// プローブ結果からステータスを決定する
    pub fn from_reachable(reachable: bool) -> Self {
        if reachable {
            Self::Ok
        } else {
            Self::Failed
        }
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ServiceStatus のパースエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseServiceStatusError(pub String);

impl std::fmt::Display for ParseServiceStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown service status: '{}'", self.0)
    }
}

impl std::error::Error for ParseServiceStatusError {}

impl FromStr for ServiceStatus {
    type Err = ParseServiceStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNKNOWN" => Ok(Self::Unknown),
            "OK" => Ok(Self::Ok),
            "FAILED" => Ok(Self::Failed),
            _ => Err(ParseServiceStatusError(s.to_string())),
        }
    }
}

/// 監視対象サービス
///
/// JSONでは `{id, url, name, status, creation_date}` の形で表現される。
/// `creation_date` はローカル時刻のISO-8601表記。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Service {
    /// 一意識別子（UUID v7、時刻順）
    pub id: Uuid,
    /// 監視対象URL
    pub url: String,
    /// 表示名（未指定時は空文字列）
    pub name: String,
    /// 最新のプローブ結果
    pub status: ServiceStatus,
    /// 登録日時（ミリ秒精度）
    #[serde(with = "local_date_time")]
    pub creation_date: DateTime<Local>,
}

impl Service {
    /// 新しいサービスを作成（ステータスは常にUNKNOWN）
    pub fn new(url: String, name: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            url,
            name,
            status: ServiceStatus::Unknown,
            // 永続化はエポックミリ秒のため、ここで精度を揃えておく
            creation_date: Local::now().trunc_subsecs(3),
        }
    }

    /// ステータスだけを差し替えたコピーを返す
    pub fn with_status(self, status: ServiceStatus) -> Self {
        Self { status, ..self }
    }
}

/// サービス更新内容
///
/// `url` は必須だが、呼び出し側の入力をそのまま受けてレジストリで検証するため
/// `Option` で保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUpdate {
    /// 更新対象のID
    pub id: Uuid,
    /// 新しいURL
    pub url: Option<String>,
    /// 新しい表示名
    pub name: String,
}

/// `DateTime<Local>` をオフセットなしのISO-8601ローカル日時として扱うserdeヘルパー
mod local_date_time {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
    use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Local>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.naive_local().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Local>, D::Error> {
        let naive = NaiveDateTime::deserialize(deserializer)?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| D::Error::custom(format!("nonexistent local time: {naive}")))
    }
}
