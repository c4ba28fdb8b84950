// ==========================================
// 智能抽签系统 - 随机抽样
// ==========================================
// 算法: 部分 Fisher-Yates 洗牌（无放回，所有 count 元子集等概率）
// 可指定种子，便于测试复现
// ==========================================

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// 抽样接口
pub trait Sampler: Send {
    /// 从 `0..pool_size` 中无放回抽取 `count` 个下标
    ///
    /// 返回顺序即抽中顺序；调用方保证 `count <= pool_size`
    fn sample_indices(&mut self, pool_size: usize, count: usize) -> Vec<usize>;
}

/// 均匀随机抽样器
pub struct UniformSampler {
    rng: StdRng,
}

impl UniformSampler {
    /// 使用系统熵源
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// 使用固定种子
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Sampler for UniformSampler {
    fn sample_indices(&mut self, pool_size: usize, count: usize) -> Vec<usize> {
        let count = count.min(pool_size);
        let mut indices: Vec<usize> = (0..pool_size).collect();
        let (chosen, _) = indices.partial_shuffle(&mut self.rng, count);
        chosen.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_distinct_and_in_range() {
        let mut sampler = UniformSampler::seeded(7);
        for count in 0..=10 {
            let picked = sampler.sample_indices(10, count);
            assert_eq!(picked.len(), count);
            let unique: HashSet<usize> = picked.iter().copied().collect();
            assert_eq!(unique.len(), count);
            assert!(picked.iter().all(|&i| i < 10));
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let mut a = UniformSampler::seeded(42);
        let mut b = UniformSampler::seeded(42);
        for _ in 0..5 {
            assert_eq!(a.sample_indices(50, 7), b.sample_indices(50, 7));
        }
    }

    #[test]
    fn test_count_clamped_to_pool() {
        let mut sampler = UniformSampler::seeded(1);
        assert_eq!(sampler.sample_indices(3, 5).len(), 3);
        assert!(sampler.sample_indices(0, 2).is_empty());
    }

    #[test]
    fn test_roughly_uniform() {
        let mut sampler = UniformSampler::seeded(2024);
        let mut hits = [0usize; 4];
        for _ in 0..4000 {
            hits[sampler.sample_indices(4, 1)[0]] += 1;
        }
        // 期望 1000，标准差约 27
        for h in hits {
            assert!((850..=1150).contains(&h), "hits={:?}", hits);
        }
    }
}
