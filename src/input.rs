use crate::sink::{Flow, Sink};
use std::fmt::{Debug, Formatter};

/// 元素源：包装一个有限序列，只能被推送遍历一次。
pub struct Source<'a, T> {
    iter: Box<dyn Iterator<Item = T> + 'a>,
    size: Option<usize>,
}

impl<'a, T> Source<'a, T> {
    /// 从任意有限序列创建，序列能给出精确长度时记录为元素数量提示。
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        let iter = values.into_iter();
        let size = match iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(lower),
            _ => None,
        };
        Source { iter: Box::new(iter), size }
    }

    /// 从任意有限序列创建，并显式指定元素数量提示。
    pub fn with_size<I>(values: I, size: Option<usize>) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Source { iter: Box::new(values.into_iter()), size }
    }

    pub fn size(&self) -> Option<usize> {
        self.size
    }

    /// 按顺序把每个元素推送给`sink`，下游要求停止时立即返回。
    pub(crate) fn push(self, sink: &mut dyn Sink<T>) -> Flow {
        let mut iter = self.iter;
        iter.try_for_each(|item| sink.accept(item))
    }
}

impl<'a, T: 'a> From<Vec<T>> for Source<'a, T> {
    fn from(values: Vec<T>) -> Self {
        Source::new(values)
    }
}

impl<T> Debug for Source<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source").field("size", &self.size).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::testing::Recorder;
    use std::ops::ControlFlow;

    #[test]
    fn test_size() {
        assert_eq!(Source::new(vec![1, 2, 3]).size(), Some(3));
        assert_eq!(Source::from(Vec::<i32>::new()).size(), Some(0));
        assert_eq!(Source::new((0..10).filter(|i| i % 2 == 0)).size(), None);
        assert_eq!(Source::with_size(vec![1, 2], None).size(), None);
        assert_eq!(Source::with_size((0..10).filter(|i| i % 2 == 0), Some(5)).size(), Some(5));
    }

    #[test]
    fn test_push() {
        let mut recorder = Recorder::new();
        let flow = Source::new(vec!["a", "b", "c"]).push(&mut recorder);
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(recorder.items, vec!["a", "b", "c"]);
        // push 只负责 accept，begin 和 end 由驱动方调用
        assert!(recorder.begins.is_empty());
        assert_eq!(recorder.ends, 0);
    }

    #[test]
    fn test_push_stop() {
        let mut pulled = 0;
        let mut recorder = Recorder::stop_after(2);
        let source = Source::new((1..=10).inspect(|_| pulled += 1));
        assert!(source.push(&mut recorder).is_break());
        assert_eq!(recorder.items, vec![1, 2]);
        assert_eq!(pulled, 2);
    }
}
