//! 物件リストファイルの読み込みを担当するモジュール
//!
//! このモジュールは、CSVまたはJSON形式のファイルから物件リストを読み込み、
//! 地区名のパターンによる絞り込みを行うための機能を提供します。

use super::error::AnalyzerError;
use super::listing::Listing;
use regex::Regex;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// 物件リストファイルへのアクセスを管理する構造体
///
/// # フィールド
///
/// - `path`: 物件リストファイルのパス
/// - `include_patterns`: 分析対象とする地区名パターン
/// - `exclude_patterns`: 分析から除外する地区名パターン
pub struct ListingSource {
    path: PathBuf,
    include_patterns: Vec<Regex>,
    exclude_patterns: Vec<Regex>,
}

impl ListingSource {
    /// 指定されたパスの物件リストファイルを開きます
    ///
    /// ファイル自体は`listings`の呼び出し時に読み込まれます。
    ///
    /// # エラー
    ///
    /// 以下の場合にエラーを返します：
    /// - ファイルが存在しない
    /// - パターンの正規表現への変換に失敗
    pub fn open(
        path: impl AsRef<Path>,
        include_patterns: Vec<String>,
        exclude_patterns: Vec<String>,
    ) -> Result<Self, AnalyzerError> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(AnalyzerError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("listing file not found: {}", path.display()),
            )));
        }

        Ok(Self {
            path,
            include_patterns: compile_patterns(include_patterns)?,
            exclude_patterns: compile_patterns(exclude_patterns)?,
        })
    }

    /// 指定された地区名が分析対象に含まれるかどうかを判定します
    fn should_include_neighborhood(&self, neighborhood: &str) -> bool {
        if self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.is_match(neighborhood))
        {
            return false;
        }

        if self.include_patterns.is_empty() {
            return true;
        }

        self.include_patterns
            .iter()
            .any(|pattern| pattern.is_match(neighborhood))
    }

    /// ファイルから物件リストを読み込みます
    ///
    /// 拡張子が`.json`の場合はJSON配列として、それ以外はCSVとして読み込みます。
    ///
    /// # エラー
    ///
    /// 以下の場合にエラーを返します：
    /// - ファイルの読み込みやデコードに失敗
    /// - 物件の値が不正（地区名が空、価格が正でない、面積が負など）
    pub fn listings(&self) -> Result<Vec<Listing>, AnalyzerError> {
        let is_json = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let listings: Vec<Listing> = if is_json {
            let records: Vec<serde_json::Value> =
                serde_json::from_reader(BufReader::new(File::open(&self.path)?))?;
            records
                .into_iter()
                .map(json_listing)
                .collect::<Result<Vec<_>, _>>()?
        } else {
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_path(&self.path)?;
            reader
                .deserialize::<Listing>()
                .collect::<Result<Vec<_>, _>>()?
        };

        let mut selected = Vec::with_capacity(listings.len());
        for listing in listings {
            listing.validate()?;
            if self.should_include_neighborhood(&listing.neighborhood) {
                selected.push(listing);
            }
        }

        Ok(selected)
    }
}

/// JSONの物件1件を読み込みます
///
/// 数値のIDはJSON上の表記のまま文字列として保持します。
fn json_listing(mut record: serde_json::Value) -> Result<Listing, serde_json::Error> {
    if let Some(serde_json::Value::Number(n)) = record.get("id") {
        let id = n.to_string();
        record["id"] = serde_json::Value::String(id);
    }
    serde_json::from_value(record)
}

fn compile_patterns(patterns: Vec<String>) -> Result<Vec<Regex>, AnalyzerError> {
    patterns
        .into_iter()
        .map(|p| Regex::new(&glob_to_regex(&p)))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AnalyzerError::InvalidPattern(e.to_string()))
}

/// 地区名のグロブパターンを正規表現に変換します
///
/// `*`は任意の文字列、`?`は任意の1文字にマッチし、それ以外はリテラルとして扱います。
fn glob_to_regex(pattern: &str) -> String {
    let mut regex = String::new();
    regex.push('^');

    for c in pattern.chars() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            c if c.is_alphanumeric() || c == ' ' => regex.push(c),
            _ => regex.push_str(&regex::escape(&c.to_string())),
        }
    }

    regex.push('$');
    regex
}
