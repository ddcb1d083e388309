//! 直方图分箱边界.
//!
//! 边界在 `[0, 2^bit_depth]` 上线性等分出 `bin_count + 1` 个点, 再整体减 1,
//! 得到 `[-1, 2^bit_depth - 1]`. 这样样本值 0 落在第一个箱内,
//! 最大样本值 `2^bit_depth - 1` 恰好等于最后一个边界, 归入最后一个箱.

use yuvscope_core::{ScopeError, ScopeResult};

/// 分箱边界 (构造后不可变)
#[derive(Debug, Clone, PartialEq)]
pub struct BinEdges {
    edges: Vec<f64>,
    bit_depth: u32,
    /// 相邻边界的间距, 用于 O(1) 估算箱索引
    step: f64,
}

impl BinEdges {
    /// 构造 `bin_count` 个箱的边界
    pub fn new(bin_count: usize, bit_depth: u32) -> ScopeResult<Self> {
        if bin_count == 0 {
            return Err(ScopeError::InvalidArgument("箱数必须大于 0".into()));
        }
        if bit_depth == 0 || bit_depth > 16 {
            return Err(ScopeError::InvalidArgument(format!(
                "位深 {bit_depth} 超出 1..=16"
            )));
        }

        let stop = f64::from(1u32 << bit_depth);
        let step = stop / bin_count as f64;
        // 与 linspace 一致: 中间点为 i * step, 末点精确取 stop
        let mut edges: Vec<f64> = (0..bin_count).map(|i| i as f64 * step - 1.0).collect();
        edges.push(stop - 1.0);

        Ok(Self {
            edges,
            bit_depth,
            step,
        })
    }

    /// 箱数
    pub fn bin_count(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn bit_depth(&self) -> u32 {
        self.bit_depth
    }

    /// 全部 `bin_count + 1` 个边界
    pub fn as_slice(&self) -> &[f64] {
        &self.edges
    }

    pub fn lower(&self) -> f64 {
        self.edges[0]
    }

    pub fn upper(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// 计算样本所属的箱
    ///
    /// 箱为左闭右开 `[e[i], e[i+1])`, 最后一个箱右端闭合.
    /// 超出边界范围的样本返回 `None` (丢弃, 不算错误).
    pub fn bin_index(&self, sample: u16) -> Option<usize> {
        let value = f64::from(sample);
        let last = self.bin_count() - 1;
        if value < self.lower() || value > self.upper() {
            return None;
        }
        if value == self.upper() {
            return Some(last);
        }

        // 等宽箱先直接估算, 再按实际边界修正浮点误差
        let mut idx = (((value - self.lower()) / self.step) as usize).min(last);
        while idx > 0 && value < self.edges[idx] {
            idx -= 1;
        }
        while idx < last && value >= self.edges[idx + 1] {
            idx += 1;
        }
        Some(idx)
    }
}
