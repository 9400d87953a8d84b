use crate::Integer;
use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum RiverErr {
    #[error("[Bad Arg] Argument `{arg}` of op `{op}` must be a non-negative integer, got `{value}`")]
    InvalidArg { op: &'static str, arg: &'static str, value: Integer },

    #[error("[Consumed] The source of this river has already been traversed by a terminal op")]
    AlreadyConsumed,

    #[error("[Callback] Callback of terminal op `{op}` failed, error: {err}")]
    Callback { op: &'static str, err: String },
}

impl RiverErr {
    /// 校验非负整数参数并转换为`usize`。
    pub(crate) fn non_negative(op: &'static str, arg: &'static str, value: Integer) -> Result<usize, RiverErr> {
        usize::try_from(value).map_err(|_| RiverErr::InvalidArg { op, arg, value })
    }
}
