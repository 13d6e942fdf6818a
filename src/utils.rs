/// `set_xxx(v)` 把 `Option` 字段设成 `Some(v)`, 返回 `&mut Self` 方便链式调用.
macro_rules! builder_set_fn {
    ($fn_name:ident, $field:ident, $t:ty) => {
        pub fn $fn_name(&mut self, $field: $t) -> &mut Self {
            self.$field = Some($field);
            self
        }
    };
}
pub(crate) use builder_set_fn;
