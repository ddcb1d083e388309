//! 平面直方图与累加.
//!
//! 计数只做加法, 因此逐帧的部分直方图可以按任意顺序相加, 结果不变.

use serde::Serialize;
use yuvscope_core::{Plane, ScopeError, ScopeResult};

use crate::bin_edges::BinEdges;
use crate::reader::RawSampleBuffer;

/// 单个平面的直方图
///
/// 除了每个箱的计数, 还记录处理过的样本总数和落在边界外被丢弃的样本数,
/// 始终满足 `counts 之和 + dropped == samples`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaneHistogram {
    counts: Vec<u64>,
    samples: u64,
    dropped: u64,
}

impl PlaneHistogram {
    /// 创建全零直方图
    pub fn new(bin_count: usize) -> Self {
        Self {
            counts: vec![0; bin_count],
            samples: 0,
            dropped: 0,
        }
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// 处理过的样本总数
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// 超出边界范围被丢弃的样本数
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// 落入各箱的样本总数
    pub fn counted(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// 最大单箱计数
    pub fn peak(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// 统计一组样本值
    pub fn add_samples<I: IntoIterator<Item = u16>>(&mut self, samples: I, edges: &BinEdges) {
        for sample in samples {
            self.samples += 1;
            match edges.bin_index(sample) {
                Some(idx) => self.counts[idx] += 1,
                None => self.dropped += 1,
            }
        }
    }

    /// 逐元素累加另一个直方图
    pub fn merge(&mut self, other: &PlaneHistogram) -> ScopeResult<()> {
        if other.bin_count() != self.bin_count() {
            return Err(ScopeError::InvalidArgument(format!(
                "箱数不一致: {} != {}",
                self.bin_count(),
                other.bin_count()
            )));
        }
        for (total, count) in self.counts.iter_mut().zip(&other.counts) {
            *total += count;
        }
        self.samples += other.samples;
        self.dropped += other.dropped;
        Ok(())
    }
}

/// 对一个平面的样本分箱, 返回该平面本帧的直方图
pub fn bin_samples(buffer: &RawSampleBuffer, edges: &BinEdges) -> PlaneHistogram {
    let mut hist = PlaneHistogram::new(edges.bin_count());
    hist.add_samples(buffer.samples(), edges);
    hist
}

/// 将 `counts` 累加进 `totals`
pub fn accumulate(totals: &mut PlaneHistogram, counts: &PlaneHistogram) -> ScopeResult<()> {
    totals.merge(counts)
}

/// Y/U/V 三个平面的直方图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaneHistograms {
    pub y: PlaneHistogram,
    pub u: PlaneHistogram,
    pub v: PlaneHistogram,
}

impl PlaneHistograms {
    pub fn new(bin_count: usize) -> Self {
        Self {
            y: PlaneHistogram::new(bin_count),
            u: PlaneHistogram::new(bin_count),
            v: PlaneHistogram::new(bin_count),
        }
    }

    pub fn get(&self, plane: Plane) -> &PlaneHistogram {
        match plane {
            Plane::Y => &self.y,
            Plane::U => &self.u,
            Plane::V => &self.v,
        }
    }

    pub fn get_mut(&mut self, plane: Plane) -> &mut PlaneHistogram {
        match plane {
            Plane::Y => &mut self.y,
            Plane::U => &mut self.u,
            Plane::V => &mut self.v,
        }
    }

    /// 按 Y, U, V 顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (Plane, &PlaneHistogram)> {
        Plane::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges4() -> BinEdges {
        BinEdges::new(4, 10).unwrap()
    }

    #[test]
    fn test_bin_samples_spread() {
        let buf =
            RawSampleBuffer::from_samples(Plane::Y, &[0, 0, 300, 300, 600, 600, 1023, 1023]);
        let hist = bin_samples(&buf, &edges4());
        assert_eq!(hist.counts(), &[2, 2, 2, 2]);
        assert_eq!(hist.samples(), 8);
        assert_eq!(hist.dropped(), 0);
    }

    #[test]
    fn test_all_zero_buffer_lands_in_first_bin() {
        let buf = RawSampleBuffer::from_bytes(Plane::U, vec![0u8; 64]).unwrap();
        let hist = bin_samples(&buf, &BinEdges::new(256, 10).unwrap());
        assert_eq!(hist.counts()[0], 32);
        assert_eq!(hist.counted(), 32);
    }

    #[test]
    fn test_out_of_range_samples_dropped() {
        let buf = RawSampleBuffer::from_samples(Plane::V, &[1023, 1024, 4095, 65535, 5]);
        let hist = bin_samples(&buf, &edges4());
        assert_eq!(hist.counts(), &[1, 0, 0, 1]);
        assert_eq!(hist.dropped(), 3);
        assert_eq!(hist.counted() + hist.dropped(), hist.samples());
    }

    #[test]
    fn test_accumulate_order_independent() {
        let edges = edges4();
        let parts: Vec<PlaneHistogram> = [
            vec![0u16, 10, 900],
            vec![400, 401, 2000],
            vec![1023, 256, 255, 254],
        ]
        .iter()
        .map(|s| bin_samples(&RawSampleBuffer::from_samples(Plane::Y, s), &edges))
        .collect();

        let mut forward = PlaneHistogram::new(4);
        for p in &parts {
            accumulate(&mut forward, p).unwrap();
        }
        let mut backward = PlaneHistogram::new(4);
        for p in parts.iter().rev() {
            accumulate(&mut backward, p).unwrap();
        }
        assert_eq!(forward, backward);
        assert_eq!(forward.samples(), 10);
        assert_eq!(forward.dropped(), 1);
        assert_eq!(forward.counts(), &[3, 4, 0, 2]);
    }

    #[test]
    fn test_merge_rejects_mismatched_bins() {
        let mut a = PlaneHistogram::new(4);
        let b = PlaneHistogram::new(8);
        assert!(matches!(a.merge(&b), Err(ScopeError::InvalidArgument(_))));
    }
}
