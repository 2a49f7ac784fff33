/// Glyph on the play/pause button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlayIcon {
    /// Shown while paused: pressing it plays.
    #[default]
    Play,
    /// Shown while playing: pressing it pauses.
    Pause,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum MuteIcon {
    #[default]
    Unmuted,
    Muted,
}

/// Everything on the page the player writes to.
pub trait UiSurface {
    fn set_play_icon(&mut self, icon: PlayIcon);
    fn set_mute_icon(&mut self, icon: MuteIcon);
    /// Progress slider value, 0..=100.
    fn set_progress(&mut self, percent: f64);
    /// Volume slider value, 0..=100.
    fn set_volume_slider(&mut self, percent: f64);
    fn set_time_labels(&mut self, current: String, duration: String);
    fn set_track_info(&mut self, title: &str, artist: &str);
    /// Mark one playlist row active and every other row inactive.
    fn set_active_row(&mut self, index: usize);
    /// Advisory line shown under the player, `None` hides it.
    fn set_notice(&mut self, notice: Option<String>);
}

/// The rendered state of the player widget; `ui::draw` paints it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceModel {
    pub play_icon: PlayIcon,
    pub mute_icon: MuteIcon,
    pub progress: f64,
    pub volume: f64,
    pub current_time: String,
    pub duration: String,
    pub title: String,
    pub artist: String,
    pub active_row: usize,
    pub notice: Option<String>,
}

impl UiSurface for SurfaceModel {
    fn set_play_icon(&mut self, icon: PlayIcon) {
        self.play_icon = icon;
    }

    fn set_mute_icon(&mut self, icon: MuteIcon) {
        self.mute_icon = icon;
    }

    fn set_progress(&mut self, percent: f64) {
        self.progress = percent;
    }

    fn set_volume_slider(&mut self, percent: f64) {
        self.volume = percent;
    }

    fn set_time_labels(&mut self, current: String, duration: String) {
        self.current_time = current;
        self.duration = duration;
    }

    fn set_track_info(&mut self, title: &str, artist: &str) {
        self.title = title.to_string();
        self.artist = artist.to_string();
    }

    fn set_active_row(&mut self, index: usize) {
        self.active_row = index;
    }

    fn set_notice(&mut self, notice: Option<String>) {
        self.notice = notice;
    }
}
