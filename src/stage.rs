use crate::RiverRes;
use crate::config::Config;
use crate::err::RiverErr;
use crate::input::Source;
use crate::op::{MapFn, MapSink, Op, OpKind};
use crate::sink::Sink;
use std::ops::ControlFlow;
use tracing::{debug, trace};

/// 操作链上的一个节点，只持有前一个节点，链的起点是元素源节点。
pub(crate) trait Stage<T> {
    fn kind(&self) -> OpKind;

    /// 从元素源开始，依次追加每个节点的标签。
    fn labels(&self, labels: &mut Vec<String>);

    /// 以`sink`为下游执行操作链。
    ///
    /// 每个节点用自己的消费者包装`sink`后交给前一个节点，直到元素源节点驱动遍历。
    /// 所有消费者都位于这条调用链的栈上，遍历结束即被释放。
    fn launch(&mut self, sink: &mut dyn Sink<T>, configs: &[Config]) -> RiverRes<()>;
}

pub(crate) struct SourceStage<'a, T> {
    source: Option<Source<'a, T>>,
}

impl<'a, T> SourceStage<'a, T> {
    pub(crate) fn new(source: Source<'a, T>) -> Self {
        SourceStage { source: Some(source) }
    }
}

impl<T> Stage<T> for SourceStage<'_, T> {
    fn kind(&self) -> OpKind {
        OpKind::Source
    }

    fn labels(&self, labels: &mut Vec<String>) {
        labels.push(self.kind().name().to_owned());
    }

    fn launch(&mut self, sink: &mut dyn Sink<T>, _configs: &[Config]) -> RiverRes<()> {
        let Some(source) = self.source.take() else {
            return Err(RiverErr::AlreadyConsumed);
        };
        let size = source.size();
        debug!(?size, "start traversal");
        sink.begin(size);
        if sink.satisfied() {
            debug!("downstream satisfied before the first element");
        } else if let ControlFlow::Break(halt) = source.push(sink) {
            debug!(?halt, "traversal halted before source exhausted");
        }
        sink.end();
        Ok(())
    }
}

pub(crate) struct OpStage<'a, T> {
    previous: Box<dyn Stage<T> + 'a>,
    op: Op<'a, T>,
}

impl<'a, T> OpStage<'a, T> {
    pub(crate) fn new(previous: Box<dyn Stage<T> + 'a>, op: Op<'a, T>) -> Self {
        OpStage { previous, op }
    }
}

impl<T> Stage<T> for OpStage<'_, T> {
    fn kind(&self) -> OpKind {
        self.op.kind()
    }

    fn labels(&self, labels: &mut Vec<String>) {
        self.previous.labels(labels);
        labels.push(self.op.label());
    }

    fn launch(&mut self, sink: &mut dyn Sink<T>, configs: &[Config]) -> RiverRes<()> {
        trace!(op = self.op.kind().name(), "wrap sink");
        let mut wrapped = self.op.wrap(sink, configs);
        self.previous.launch(&mut wrapped, configs)
    }
}

pub(crate) struct MapStage<'a, I, O> {
    previous: Box<dyn Stage<I> + 'a>,
    f: MapFn<'a, I, O>,
}

impl<'a, I, O> MapStage<'a, I, O> {
    pub(crate) fn new(previous: Box<dyn Stage<I> + 'a>, f: MapFn<'a, I, O>) -> Self {
        MapStage { previous, f }
    }
}

impl<I, O> Stage<O> for MapStage<'_, I, O> {
    fn kind(&self) -> OpKind {
        OpKind::Map
    }

    fn labels(&self, labels: &mut Vec<String>) {
        self.previous.labels(labels);
        labels.push(self.kind().name().to_owned());
    }

    fn launch(&mut self, sink: &mut dyn Sink<O>, configs: &[Config]) -> RiverRes<()> {
        trace!(op = self.kind().name(), "wrap sink");
        let mut wrapped = MapSink::new(&mut self.f, sink);
        self.previous.launch(&mut wrapped, configs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::testing::Recorder;

    fn source_stage<'a>(values: Vec<i32>) -> Box<dyn Stage<i32> + 'a> {
        Box::new(SourceStage::new(Source::from(values)))
    }

    #[test]
    fn test_source_stage() {
        let mut stage = SourceStage::new(Source::from(vec![1, 2, 3]));
        let mut recorder = Recorder::new();
        stage.launch(&mut recorder, &[]).unwrap();
        assert_eq!(recorder.begins, vec![Some(3)]);
        assert_eq!(recorder.items, vec![1, 2, 3]);
        assert_eq!(recorder.ends, 1);
        assert_eq!(stage.launch(&mut recorder, &[]), Err(RiverErr::AlreadyConsumed));
        assert_eq!(recorder.ends, 1);
    }

    #[test]
    fn test_end_after_halt() {
        let mut stage = SourceStage::new(Source::from(vec![1, 2, 3]));
        let mut recorder = Recorder::stop_after(1);
        stage.launch(&mut recorder, &[]).unwrap();
        assert_eq!(recorder.items, vec![1]);
        assert_eq!(recorder.ends, 1);
    }

    #[test]
    fn test_skip_push_when_satisfied() {
        let mut pulled = 0;
        let values = vec![1, 2, 3];
        let source = Source::new(values.iter().inspect(|_| pulled += 1).copied());
        let mut limit = OpStage::new(Box::new(SourceStage::new(source)), Op::new_limit(0).unwrap());
        let mut recorder = Recorder::new();
        limit.launch(&mut recorder, &[]).unwrap();
        drop(limit);
        assert_eq!(pulled, 0);
        assert!(recorder.items.is_empty());
        assert_eq!(recorder.begins, vec![Some(0)]);
        assert_eq!(recorder.ends, 1);
    }

    #[test]
    fn test_end_once_after_failure_in_sort() {
        let sort = OpStage::new(source_stage(vec![4, 2, 3, 1]), Op::new_sort(|l: &i32, r: &i32| l.cmp(r)));
        let mut peek_seen = vec![];
        let mut peek = OpStage::new(Box::new(sort), Op::new_peek(|i: &i32| peek_seen.push(*i)));
        let mut recorder = Recorder::fail_after(2);
        peek.launch(&mut recorder, &[]).unwrap();
        drop(peek);
        assert_eq!(recorder.items, vec![1, 2]);
        assert_eq!(peek_seen, vec![1, 2]);
        assert_eq!(recorder.ends, 1);
    }

    #[test]
    fn test_assembly_order() {
        // source -> skip(1) -> map -> limit(2)
        let skip = OpStage::new(source_stage(vec![1, 2, 3, 4, 5]), Op::new_skip(1).unwrap());
        let times: MapFn<i32, i32> = Box::new(|i| i * 100);
        let map = MapStage::new(Box::new(skip), times);
        let mut limit = OpStage::new(Box::new(map), Op::new_limit(2).unwrap());
        assert_eq!(limit.kind(), OpKind::Limit);

        let mut labels = vec![];
        limit.labels(&mut labels);
        assert_eq!(labels, vec!["source", "skip(1)", "map", "limit(2)"]);

        let mut recorder = Recorder::new();
        limit.launch(&mut recorder, &[]).unwrap();
        assert_eq!(recorder.items, vec![200, 300]);
        assert_eq!(recorder.begins, vec![Some(2)]);
        assert_eq!(recorder.ends, 1);
    }
}
