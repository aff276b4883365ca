//! ヘルスポーリング
//!
//! 登録済みサービスへ定期的にHTTP GETを送り、到達可否をステータスとして記録する。
//! プローブは1サービスごとに独立したタスクで並行実行される。

pub mod poller;
pub mod prober;
pub mod scheduler;

pub use poller::{BackgroundPoller, PollCycle};
pub use prober::{HttpProber, Prober};
pub use scheduler::PollScheduler;
