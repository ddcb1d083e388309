//! YUV 平面标识.

use std::fmt;

/// 平面 YUV 帧中的一个分量平面
///
/// 磁盘上的存放顺序固定为 Y, U, V.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    /// 亮度
    Y,
    /// 色度 Cb
    U,
    /// 色度 Cr
    V,
}

impl Plane {
    /// 按磁盘顺序排列的全部平面
    pub const ALL: [Plane; 3] = [Plane::Y, Plane::U, Plane::V];

    /// 平面索引 (Y=0, U=1, V=2)
    pub const fn index(&self) -> usize {
        match self {
            Self::Y => 0,
            Self::U => 1,
            Self::V => 2,
        }
    }

    /// 是否为色度平面
    pub const fn is_chroma(&self) -> bool {
        !matches!(self, Self::Y)
    }

    /// 平面名称
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Y => "Y",
            Self::U => "U",
            Self::V => "V",
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
