//! 文字列類似度
//!
//! 最長一致ブロックを貪欲に探索する SequenceMatcher 方式の類似度比
//! `2·M / T` を計算する（M: 一致文字数、T: 両文字列の文字数合計）。
//!
//! ## 互換性
//! - 文字単位は Unicode スカラー値
//! - junk 判定なし
//! - 比較対象（b）が200文字以上の場合、出現数が `len/100 + 1` を超える
//!   文字を「頻出要素」としてインデックスから除外する

use std::collections::HashMap;
use std::fmt::Display;

/// 一致判定のデフォルト閾値
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.8;

/// 頻出要素の除外を行う最小長
const AUTOJUNK_MIN_LEN: usize = 200;

/// 2文字列間の最長一致ブロック探索器
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    /// b の文字 → 出現位置（昇順）
    b2j: HashMap<char, Vec<usize>>,
}

/// 一致ブロック (aの開始位置, bの開始位置, 長さ)
pub type MatchingBlock = (usize, usize, usize);

impl SequenceMatcher {
    pub fn new(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        let n = b.len();
        if n >= AUTOJUNK_MIN_LEN {
            let ntest = n / 100 + 1;
            b2j.retain(|_, indices| indices.len() <= ntest);
        }

        Self { a, b, b2j }
    }

    /// a[alo..ahi] と b[blo..bhi] の最長一致ブロック
    ///
    /// 同じ長さの候補が複数ある場合は a 側で最も早く始まるもの、
    /// その中で b 側で最も早く始まるものを返す。
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchingBlock {
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);

        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut new_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(indices) = self.b2j.get(&self.a[i]) {
                for &j in indices {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    new_j2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // インデックスから除外した頻出要素で一致を前後に伸ばす
        while besti > alo && bestj > blo && self.a[besti - 1] == self.b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }

        (besti, bestj, bestsize)
    }

    /// 重ならない一致ブロックの一覧（a の位置順、隣接ブロックは結合済み）
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.find_longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            blocks.push((i, j, k));
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }
        blocks.sort_unstable();

        let mut merged: Vec<MatchingBlock> = Vec::with_capacity(blocks.len());
        for (i, j, k) in blocks {
            match merged.last_mut() {
                Some((pi, pj, pk)) if *pi + *pk == i && *pj + *pk == j => *pk += k,
                _ => merged.push((i, j, k)),
            }
        }
        merged
    }

    /// 類似度比 [0, 1]
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matches: usize = self.matching_blocks().iter().map(|&(_, _, k)| k).sum();
        2.0 * matches as f64 / total as f64
    }
}

/// 2値の類似度（文字列表現で比較）
pub fn similarity<A: Display + ?Sized, B: Display + ?Sized>(a: &A, b: &B) -> f64 {
    SequenceMatcher::new(&a.to_string(), &b.to_string()).ratio()
}

/// 類似度が閾値以上か
pub fn is_similar<A: Display + ?Sized, B: Display + ?Sized>(a: &A, b: &B, threshold: f64) -> bool {
    similarity(a, b) >= threshold
}
