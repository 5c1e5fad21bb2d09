//! 不動産市場のホットスポット分析の中核となるモジュール
//!
//! 分析プロセスは以下の流れで行われます：
//!
//! 1. 各物件の単位面積あたり価格の計算（`listing`）
//! 2. 最古日・最新日によるスナップショット分割（`snapshot`）
//! 3. 地区ごとの平均単価と成長率の集計（`growth`）
//! 4. 出力行の組み立てとホットスポットの選択（`metrics`）
//!
//! 各段階は入力を所有し、次の段階へ新しい構造を渡します。
//! 実行間で共有される状態はありません。
//!
//! # 主要なコンポーネント
//!
//! - `MarketAnalyzer`: 分析プロセス全体を制御する構造体
//! - `MarketReport`: 1回の分析結果
//! - `ListingSource`: ファイルから物件リストを読み込む入力境界

mod error;
mod growth;
mod listing;
mod metrics;
mod snapshot;
mod source;

pub use error::AnalyzerError;
pub use growth::{aggregate, snapshot_metrics, GrowthTable, NeighborhoodMetric};
pub use listing::{normalize, Listing, Normalized, PricedListing, ZeroAreaPolicy};
pub use metrics::{assemble, select_hotspot, GrowthRecord, OutputRow};
pub use snapshot::{partition, Snapshots};
pub use source::ListingSource;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

/// 分析中に除外されたデータの診断情報
///
/// # フィールド
///
/// - `skipped_listings`: 面積0のためスキップされた物件ID
/// - `excluded_listings`: 最古日・最新日の間に観測され除外された物件数
/// - `dropped_neighborhoods`: 片方のスナップショットにしか存在しない地区名
#[derive(Debug, Default, Serialize)]
pub struct Diagnostics {
    pub skipped_listings: Vec<String>,
    pub excluded_listings: usize,
    pub dropped_neighborhoods: Vec<String>,
}

/// 1回の分析結果
#[derive(Debug, Serialize)]
pub struct MarketReport {
    pub old_date: NaiveDate,
    pub new_date: NaiveDate,
    pub hotspot: GrowthRecord,
    pub growth: Vec<GrowthRecord>,
    pub rows: Vec<OutputRow>,
    pub diagnostics: Diagnostics,
}

/// ホットスポット分析を実行するメインの構造体
#[derive(Debug, Default)]
pub struct MarketAnalyzer {
    zero_area_policy: ZeroAreaPolicy,
}

impl MarketAnalyzer {
    /// 新しいMarketAnalyzerインスタンスを作成します
    ///
    /// # 引数
    ///
    /// - `zero_area_policy`: 面積0の物件の扱い
    pub fn new(zero_area_policy: ZeroAreaPolicy) -> Self {
        Self { zero_area_policy }
    }

    /// 物件リストを分析し、地区ごとの成長率とホットスポットを求めます
    ///
    /// # 戻り値
    ///
    /// 最新日の出力行、成長率レコード、ホットスポット、診断情報を含む
    /// `MarketReport`を返します。
    ///
    /// # エラー
    ///
    /// 以下の場合にエラーを返し、部分的な結果は返しません：
    /// - 物件リストが空、または両スナップショットに共通する地区がない
    /// - 面積0の物件がある（`ZeroAreaPolicy::Reject`の場合）
    /// - 最古日の平均単価が0の地区がある
    pub fn analyze(&self, listings: Vec<Listing>) -> Result<MarketReport, AnalyzerError> {
        let normalized = normalize(listings, self.zero_area_policy)?;
        let snapshots = partition(normalized.listings)?;
        let table = aggregate(&snapshots)?;

        let hotspot = select_hotspot(&table.records)?.clone();
        info!(
            neighborhood = %hotspot.neighborhood,
            growth_pct = hotspot.growth_pct,
            old_date = %snapshots.old_date,
            new_date = %snapshots.new_date,
            "hotspot detected"
        );

        let rows = assemble(snapshots.new, &table.records);

        Ok(MarketReport {
            old_date: snapshots.old_date,
            new_date: snapshots.new_date,
            hotspot,
            growth: table.records,
            rows,
            diagnostics: Diagnostics {
                skipped_listings: normalized.skipped,
                excluded_listings: snapshots.excluded,
                dropped_neighborhoods: table.dropped,
            },
        })
    }
}
