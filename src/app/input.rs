use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Space,
    Char(char),
}

// 一帧内的多个事件合并成状态, 由宿主喂进来.
// pressed 无视重复输入, just_pressed 和 UI 点击每帧清空.
#[derive(Debug, Default)]
pub struct Input {
    pressed: HashSet<Key>,
    just_pressed: HashSet<Key>,
    clicked: HashSet<String>,
}

// 记录
impl Input {
    pub fn clear_every_frame(&mut self) {
        self.just_pressed.clear();
        self.clicked.clear();
    }

    pub fn record_pressed(&mut self, key: Key) {
        if self.pressed.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    /// 松开以后再按下才算新的一次按键
    pub fn record_released(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    /// UI 控件被点了, 按控件名记
    pub fn record_click(&mut self, control: impl Into<String>) {
        self.clicked.insert(control.into());
    }
}

// 查询
impl Input {
    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }
    pub fn was_clicked(&self, control: &str) -> bool {
        self.clicked.contains(control)
    }
}
