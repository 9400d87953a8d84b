use crate::config::capacity;
use crate::sink::{CONTINUE, Flow, Halt, Sink};
use std::ops::ControlFlow;

/// 对每个元素执行回调。
pub(crate) struct ForEach<F> {
    f: F,
}

impl<F> ForEach<F> {
    pub(crate) fn new(f: F) -> Self {
        ForEach { f }
    }
}

impl<T, F: FnMut(T)> Sink<T> for ForEach<F> {
    fn begin(&mut self, _size: Option<usize>) {}

    fn accept(&mut self, item: T) -> Flow {
        (self.f)(item);
        CONTINUE
    }

    fn end(&mut self) {}
}

/// 对每个元素执行可能失败的回调，首次失败后不再接收元素。
pub(crate) struct TryForEach<F, E> {
    f: F,
    err: Option<E>,
}

impl<F, E> TryForEach<F, E> {
    pub(crate) fn new(f: F) -> Self {
        TryForEach { f, err: None }
    }

    pub(crate) fn into_result(self) -> Result<(), E> {
        self.err.map_or(Ok(()), Err)
    }
}

impl<T, F, E> Sink<T> for TryForEach<F, E>
where
    F: FnMut(T) -> Result<(), E>,
{
    fn begin(&mut self, _size: Option<usize>) {
        self.err = None;
    }

    fn accept(&mut self, item: T) -> Flow {
        if self.err.is_some() {
            return ControlFlow::Break(Halt::Failed);
        }
        match (self.f)(item) {
            Ok(()) => CONTINUE,
            Err(err) => {
                self.err = Some(err);
                ControlFlow::Break(Halt::Failed)
            }
        }
    }

    fn end(&mut self) {}
}

#[derive(Debug, Default)]
pub(crate) struct Count {
    count: usize,
}

impl Count {
    pub(crate) fn into_value(self) -> usize {
        self.count
    }
}

impl<T> Sink<T> for Count {
    fn begin(&mut self, _size: Option<usize>) {
        self.count = 0;
    }

    fn accept(&mut self, _item: T) -> Flow {
        self.count += 1;
        CONTINUE
    }

    fn end(&mut self) {}
}

/// 从初始值开始按源顺序从左到右累积。
pub(crate) struct Reduce<T, F> {
    /// 仅在`op`执行期间为空，`op`发生panic时整个消费者随之被丢弃。
    acc: Option<T>,
    op: F,
}

impl<T, F: FnMut(T, T) -> T> Reduce<T, F> {
    pub(crate) fn new(identity: T, op: F) -> Self {
        Reduce { acc: Some(identity), op }
    }

    pub(crate) fn into_value(self) -> T {
        self.acc.expect("accumulator is only taken while `op` runs")
    }
}

impl<T, F: FnMut(T, T) -> T> Sink<T> for Reduce<T, F> {
    fn begin(&mut self, _size: Option<usize>) {}

    fn accept(&mut self, item: T) -> Flow {
        if let Some(acc) = self.acc.take() {
            self.acc = Some((self.op)(acc, item));
        }
        CONTINUE
    }

    fn end(&mut self) {}
}

/// 收集全部元素。
pub(crate) struct ToArray<T> {
    items: Vec<T>,
    default_capacity: usize,
}

impl<T> ToArray<T> {
    pub(crate) fn new(default_capacity: usize) -> Self {
        ToArray { items: Vec::new(), default_capacity }
    }

    pub(crate) fn into_value(self) -> Vec<T> {
        self.items
    }
}

impl<T> Sink<T> for ToArray<T> {
    fn begin(&mut self, size: Option<usize>) {
        self.items = Vec::with_capacity(capacity(size, self.default_capacity));
    }

    fn accept(&mut self, item: T) -> Flow {
        self.items.push(item);
        CONTINUE
    }

    fn end(&mut self) {}
}

/// 按顺序填充调用方给定的切片，填满后不再读取元素源。
pub(crate) struct IntoSlice<'s, T> {
    slots: &'s mut [T],
    filled: usize,
}

impl<'s, T> IntoSlice<'s, T> {
    pub(crate) fn new(slots: &'s mut [T]) -> Self {
        IntoSlice { slots, filled: 0 }
    }

    pub(crate) fn filled(&self) -> usize {
        self.filled
    }
}

impl<T> Sink<T> for IntoSlice<'_, T> {
    fn begin(&mut self, _size: Option<usize>) {
        self.filled = 0;
    }

    fn accept(&mut self, item: T) -> Flow {
        let Some(slot) = self.slots.get_mut(self.filled) else {
            return ControlFlow::Break(Halt::Satisfied);
        };
        *slot = item;
        self.filled += 1;
        if self.filled == self.slots.len() { ControlFlow::Break(Halt::Satisfied) } else { CONTINUE }
    }

    fn end(&mut self) {}

    fn satisfied(&self) -> bool {
        self.filled >= self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive<T>(sink: &mut dyn Sink<T>, size: Option<usize>, items: Vec<T>) {
        sink.begin(size);
        for item in items {
            if sink.accept(item).is_break() {
                break;
            }
        }
        sink.end();
    }

    #[test]
    fn test_for_each() {
        let mut seen = vec![];
        drive(&mut ForEach::new(|s: &str| seen.push(s.len())), None, vec!["a", "bb", "ccc"]);
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_try_for_each() {
        let mut seen = vec![];
        let mut sink = TryForEach::new(|i: i32| -> Result<(), String> {
            if i == 3 {
                return Err(format!("bad item {i}"));
            }
            seen.push(i);
            Ok(())
        });
        drive(&mut sink, None, vec![1, 2, 3, 4]);
        assert_eq!(sink.into_result(), Err("bad item 3".to_string()));
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_try_for_each_ignores_after_failure() {
        let mut calls = 0;
        let mut sink = TryForEach::new(|_: i32| -> Result<(), &str> {
            calls += 1;
            Err("boom")
        });
        {
            let sink: &mut dyn Sink<i32> = &mut sink;
            sink.begin(None);
            assert_eq!(sink.accept(1), ControlFlow::Break(Halt::Failed));
            assert_eq!(sink.accept(2), ControlFlow::Break(Halt::Failed));
        }
        assert_eq!(sink.into_result(), Err("boom"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_count() {
        let mut count = Count::default();
        drive(&mut count, None, vec!['a', 'b', 'c']);
        assert_eq!(count.into_value(), 3);

        let mut count = Count::default();
        drive::<char>(&mut count, Some(0), vec![]);
        assert_eq!(count.into_value(), 0);
    }

    #[test]
    fn test_reduce() {
        let mut reduce = Reduce::new(String::from(">"), |acc: String, s: String| acc + &s);
        drive(&mut reduce, Some(3), vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(reduce.into_value(), ">abc".to_string());

        let mut reduce = Reduce::new(10, |acc: i32, i: i32| acc - i);
        drive(&mut reduce, Some(0), vec![]);
        assert_eq!(reduce.into_value(), 10);
    }

    #[test]
    fn test_to_array() {
        let mut to_array = ToArray::<i32>::new(16);
        to_array.begin(Some(100));
        assert!(to_array.items.capacity() >= 100);
        drive(&mut to_array, Some(2), vec![1, 2]);
        assert_eq!(to_array.into_value(), vec![1, 2]);
    }

    #[test]
    fn test_to_array_huge_size_hint() {
        let mut to_array = ToArray::<i32>::new(16);
        drive(&mut to_array, Some(usize::MAX), vec![1, 2]);
        assert_eq!(to_array.into_value(), vec![1, 2]);
    }

    #[test]
    fn test_into_slice() {
        let mut slots = [0; 3];
        let mut sink = IntoSlice::new(&mut slots);
        sink.begin(Some(5));
        assert!(sink.accept(7).is_continue());
        assert!(sink.accept(8).is_continue());
        assert_eq!(sink.accept(9), ControlFlow::Break(Halt::Satisfied));
        assert_eq!(sink.accept(10), ControlFlow::Break(Halt::Satisfied));
        assert_eq!(sink.filled(), 3);
        assert_eq!(slots, [7, 8, 9]);
    }

    #[test]
    fn test_into_empty_slice() {
        let mut slots: [i32; 0] = [];
        let mut sink = IntoSlice::new(&mut slots);
        sink.begin(None);
        assert!(sink.satisfied());
        assert!(sink.accept(1).is_break());
        assert_eq!(sink.filled(), 0);
    }
}
