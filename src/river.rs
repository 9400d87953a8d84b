use crate::config::{Config, default_capacity, is_verbose};
use crate::err::RiverErr;
use crate::input::Source;
use crate::op::{Op, OpKind};
use crate::output::{Count, ForEach, IntoSlice, Reduce, ToArray, TryForEach};
use crate::sink::Sink;
use crate::stage::{MapStage, OpStage, SourceStage, Stage};
use crate::{Integer, RiverRes};
use itertools::Itertools;
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;
use tracing::{debug, info};

/// 惰性的操作链。
///
/// 中间操作只追加节点，不会调用任何回调，也不会读取元素源；
/// 终结操作把整条链融合为一个消费者，对元素源只遍历一次。
/// 元素源只能被遍历一次，因此每条链只能执行一次终结操作，
/// 之后的终结操作都返回[`RiverErr::AlreadyConsumed`]。
///
/// ```
/// use river::River;
///
/// let mut river = River::of(["java", "c++", "go", "python", "c", "java"])
///     .distinct()
///     .filter(|e| *e != "go" && *e != "c++");
/// assert_eq!(river.count(), Ok(3));
/// assert!(river.count().is_err());
/// ```
pub struct River<'a, T> {
    stage: Box<dyn Stage<T> + 'a>,
    configs: Vec<Config>,
}

impl<'a, T: 'a> River<'a, T> {
    pub fn new(source: Source<'a, T>) -> Self {
        River { stage: Box::new(SourceStage::new(source)), configs: vec![] }
    }

    /// 从任意有限序列创建。
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        River::new(Source::new(values))
    }

    /// 追加配置，同类配置以后追加的为准。
    pub fn with_configs(mut self, configs: impl IntoIterator<Item = Config>) -> Self {
        self.configs.extend(configs);
        self
    }

    fn append(self, op: Op<'a, T>) -> Self {
        River { stage: Box::new(OpStage::new(self.stage, op)), configs: self.configs }
    }

    /// 最新追加的操作类型。
    pub fn kind(&self) -> OpKind {
        self.stage.kind()
    }

    /* **************************************** 中间操作 **************************************** */

    pub fn filter(self, pred: impl FnMut(&T) -> bool + 'a) -> Self {
        self.append(Op::new_filter(pred))
    }

    pub fn map<U: 'a>(self, f: impl FnMut(T) -> U + 'a) -> River<'a, U> {
        River { stage: Box::new(MapStage::new(self.stage, Box::new(f))), configs: self.configs }
    }

    pub fn distinct(self) -> Self
    where
        T: Eq + Hash + Clone,
    {
        self.append(Op::new_distinct())
    }

    /// 保留前`count`个元素，`count`为负数时返回错误且不追加操作。
    pub fn limit(self, count: Integer) -> RiverRes<Self> {
        Ok(self.append(Op::new_limit(count)?))
    }

    /// 丢弃前`count`个元素，`count`为负数时返回错误且不追加操作。
    pub fn skip(self, count: Integer) -> RiverRes<Self> {
        Ok(self.append(Op::new_skip(count)?))
    }

    pub fn sort(self, cmp: impl FnMut(&T, &T) -> Ordering + 'a) -> Self {
        self.append(Op::new_sort(cmp))
    }

    /// 按自然顺序稳定排序。
    pub fn sorted(self) -> Self
    where
        T: Ord,
    {
        self.sort(T::cmp)
    }

    pub fn peek(self, effect: impl FnMut(&T) + 'a) -> Self {
        self.append(Op::new_peek(effect))
    }

    /* **************************************** 终结操作 **************************************** */

    pub fn for_each(&mut self, f: impl FnMut(T)) -> RiverRes<()> {
        self.launch("for_each", &mut ForEach::new(f))
    }

    /// 回调首次失败后不再读取元素源，失败信息以[`RiverErr::Callback`]返回。
    pub fn try_for_each<E: Display>(&mut self, f: impl FnMut(T) -> Result<(), E>) -> RiverRes<()> {
        let mut sink = TryForEach::new(f);
        self.launch("try_for_each", &mut sink)?;
        sink.into_result().map_err(|err| RiverErr::Callback { op: "try_for_each", err: err.to_string() })
    }

    pub fn count(&mut self) -> RiverRes<usize> {
        let mut count = Count::default();
        self.launch("count", &mut count)?;
        Ok(count.into_value())
    }

    /// 从`identity`开始，按源顺序从左到右累积：`op(op(op(identity, e0), e1), ...)`。
    pub fn reduce(&mut self, identity: T, op: impl FnMut(T, T) -> T) -> RiverRes<T> {
        let mut reduce = Reduce::new(identity, op);
        self.launch("reduce", &mut reduce)?;
        Ok(reduce.into_value())
    }

    pub fn to_array(&mut self) -> RiverRes<Vec<T>> {
        let mut to_array = ToArray::new(default_capacity(&self.configs));
        self.launch("to_array", &mut to_array)?;
        Ok(to_array.into_value())
    }

    /// 按顺序填充`slots`，填满后不再读取元素源，返回实际填充的数量。
    pub fn to_array_into(&mut self, slots: &mut [T]) -> RiverRes<usize> {
        let mut sink = IntoSlice::new(slots);
        self.launch("to_array_into", &mut sink)?;
        Ok(sink.filled())
    }

    fn launch(&mut self, terminal: &'static str, sink: &mut dyn Sink<T>) -> RiverRes<()> {
        if is_verbose(&self.configs) {
            info!(chain = %self, terminal, "launch river");
        } else {
            debug!(terminal, "launch river");
        }
        self.stage.launch(sink, &self.configs)
    }
}

impl<T> Display for River<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut labels = vec![];
        self.stage.labels(&mut labels);
        write!(f, "{}", labels.iter().join(" -> "))
    }
}

impl<T> Debug for River<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("River").field("chain", &self.to_string()).field("configs", &self.configs).finish()
    }
}
