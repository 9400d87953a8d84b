use std::ops::ControlFlow;

/// 提前结束的原因。
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum Halt {
    /// 下游已得到所需的全部元素，例如`limit`达到上限。
    Satisfied,
    /// 下游回调失败，不应再向其推送任何元素。
    Failed,
}

/// `accept`的返回值，`Break`表示不再需要新的源元素。
pub(crate) type Flow = ControlFlow<Halt>;

pub(crate) const CONTINUE: Flow = ControlFlow::Continue(());

/// 推送式消费者。
///
/// 一次遍历中依次调用：`begin`一次，`accept`零到多次，`end`一次。
/// 单次遍历内的状态（计数、缓冲、去重集合）在`begin`中建立，在`end`中释放。
pub(crate) trait Sink<T> {
    /// 开始遍历，`size`为即将到达的元素数量提示，`None`表示未知。
    fn begin(&mut self, size: Option<usize>);

    fn accept(&mut self, item: T) -> Flow;

    fn end(&mut self);

    /// 在`begin`之后、读取任何元素之前，下游是否已经不再需要元素。
    fn satisfied(&self) -> bool {
        false
    }
}
