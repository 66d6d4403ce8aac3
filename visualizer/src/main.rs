use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, row, scrollable, text, text_input, Column, Container, Row,
    },
    Alignment, Color, Element, Length, Pixels, Point, Rectangle, Renderer, Subscription, Task,
    Theme,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wifigraph::graph::axis::CNT_X;
use wifigraph::graph::{ChartFrame, GraphColor, GraphLegend};
use wifigraph::scan::WiFiBand;

fn main() -> iced::Result {
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "WiFi Channel Graph".into()
}

fn application_subscription(_: &Visualizer) -> Subscription<Message> {
    time::every(Duration::from_secs(1)).map(|_| Message::Tick)
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

#[derive(Debug)]
struct Visualizer {
    config: ConfigForm,
    payload: Option<VisualizationPayload>,
    scroll_5ghz: i32,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    PayloadFetched(Result<VisualizationPayload, String>),
    ConfigFieldChanged(ConfigField, String),
    SubmitConfig,
    ConfigSubmitted(Result<String, String>),
    Scroll(i32),
}

#[derive(Debug, Clone, Copy)]
enum ConfigField {
    Networks,
    FiveGhzShare,
    Jitter,
    Dropout,
    Seed,
    Description,
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        (
            Visualizer {
                config: ConfigForm::default(),
                payload: None,
                scroll_5ghz: 0,
                status: "Waiting for scans...".into(),
                history: Vec::new(),
            },
            Task::perform(fetch_payload(), Message::PayloadFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => Task::perform(fetch_payload(), Message::PayloadFetched),
            Message::PayloadFetched(Ok(payload)) => {
                state.status = format!(
                    "Scan {}: {} networks / {} curves",
                    payload.tick, payload.network_count, payload.curve_count
                );
                if state.payload.as_ref().map(|p| p.tick) != Some(payload.tick) {
                    state.push_history(format!(
                        "Scan {}: {} curves",
                        payload.tick, payload.curve_count
                    ));
                }
                state.payload = Some(payload);
                Task::none()
            }
            Message::PayloadFetched(Err(err)) => {
                state.status = format!("Bridge error: {err}");
                Task::none()
            }
            Message::ConfigFieldChanged(field, value) => {
                state.config.update_field(field, value);
                Task::none()
            }
            Message::SubmitConfig => {
                let payload = state.config.to_payload();
                Task::perform(post_config(payload), Message::ConfigSubmitted)
            }
            Message::ConfigSubmitted(Ok(message)) => {
                state.status = message;
                state.push_history("Scenario submitted".into());
                Task::none()
            }
            Message::ConfigSubmitted(Err(err)) => {
                state.status = format!("Config error: {err}");
                Task::none()
            }
            Message::Scroll(delta) => {
                let config = WiFiBand::Ghz5.config();
                let span = config.last_channel - config.first_channel + 2 * config.spread;
                state.scroll_5ghz = (state.scroll_5ghz + delta).clamp(0, (span - CNT_X + 1).max(0));
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let config_column = column![
            text("Scan Scenario").size(26),
            text_input("Networks", &state.config.networks)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Networks, value))
                .padding(6),
            text_input("5 GHz share", &state.config.five_ghz_share)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::FiveGhzShare, value))
                .padding(6),
            text_input("Jitter (dB)", &state.config.jitter)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Jitter, value))
                .padding(6),
            text_input("Dropout", &state.config.dropout)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Dropout, value))
                .padding(6),
            text_input("Seed", &state.config.seed)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Seed, value))
                .padding(6),
            text_input("Description", &state.config.description)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Description, value))
                .padding(6),
            button("POST scenario")
                .on_press(Message::SubmitConfig)
                .padding(10),
            text(&state.status).size(14),
            column![
                text("Parameter definitions").size(16),
                text("Networks: roster size of the generated scan.").size(12),
                text("5 GHz share: fraction of networks placed on the 5 GHz band.").size(12),
                text("Jitter: largest signal change between two scans.").size(12),
                text("Dropout: chance a network is missing from one scan.").size(12),
                text("Seed: deterministic PRNG seeding so scenarios replay consistently.")
                    .size(12),
                text("Description: free-text note echoed by the bridge.").size(12),
            ]
            .spacing(4)
            .padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(340.0));

        let frames = state
            .payload
            .as_ref()
            .map(|payload| payload.frames.clone())
            .unwrap_or_default();
        let notes = state
            .payload
            .as_ref()
            .map(|payload| payload.notes.clone())
            .unwrap_or_default();

        let charts = frames
            .into_iter()
            .filter(|frame| frame.visible)
            .fold(Column::new().spacing(16), |col, frame| {
                col.push(band_panel(frame, state.scroll_5ghz))
            });

        let notes_list = if notes.is_empty() {
            Column::new().push(text("No notes yet").size(12))
        } else {
            notes
                .iter()
                .fold(Column::new().spacing(4), |col, note| {
                    col.push(text(note.clone()).size(12))
                })
        };

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let graph_column = column![
            text("Channel Graph").size(26),
            charts,
            text("Update counters").size(16),
            Container::new(notes_list).padding(6),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(90.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![config_column, scrollable(graph_column)]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

fn band_panel(frame: ChartFrame, scroll_5ghz: i32) -> Element<'static, Message> {
    let scrollable_axis = frame.axes.as_ref().is_some_and(|axes| axes.scrollable);
    let offset = if scrollable_axis { scroll_5ghz } else { 0 };
    let title = text(frame.band.name()).size(18);

    let header: Element<'static, Message> = if scrollable_axis {
        row![
            title,
            button("<").on_press(Message::Scroll(-4)).padding(4),
            button(">").on_press(Message::Scroll(4)).padding(4),
        ]
        .spacing(10)
        .align_y(Alignment::Center)
        .into()
    } else {
        title.into()
    };

    let legend = legend_column(&frame);
    let position = frame.legend_position;
    let chart = Canvas::new(ChannelChart { frame, offset })
        .width(Length::Fill)
        .height(Length::Fixed(240.0));

    let body = match position {
        GraphLegend::Left => Row::new().push(legend).push(chart),
        GraphLegend::Right => Row::new().push(chart).push(legend),
        GraphLegend::Hide => Row::new().push(chart),
    };

    column![header, body.spacing(12)].spacing(6).into()
}

fn legend_column(frame: &ChartFrame) -> Column<'static, Message> {
    frame
        .legend
        .iter()
        .fold(Column::new().spacing(2).width(Length::Fixed(220.0)), |col, entry| {
            col.push(
                text(entry.title.clone())
                    .size(12)
                    .color(argb_to_color(entry.color.primary)),
            )
        })
}

fn argb_to_color(value: u32) -> Color {
    let [r, g, b, a] = GraphColor::rgba(value);
    Color::from_rgba8(r, g, b, a as f32 / 255.0)
}

async fn fetch_payload() -> Result<VisualizationPayload, String> {
    let response = reqwest::get("http://127.0.0.1:9000/payload")
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<VisualizationPayload>()
        .await
        .map_err(|e| e.to_string())
}

async fn post_config(config: ScenarioConfig) -> Result<String, String> {
    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:9000/ingest-config")
        .json(&config)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        Ok("Scenario submitted".into())
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_else(|_| "".into());
        Err(format!("{}: {}", status, text))
    }
}

#[derive(Debug, Clone)]
struct ConfigForm {
    networks: String,
    five_ghz_share: String,
    jitter: String,
    dropout: String,
    seed: String,
    description: String,
}

impl ConfigForm {
    fn default() -> Self {
        Self {
            networks: "12".into(),
            five_ghz_share: "0.35".into(),
            jitter: "3".into(),
            dropout: "0.1".into(),
            seed: "312".into(),
            description: "Visualizer scenario".into(),
        }
    }

    fn update_field(&mut self, field: ConfigField, value: String) {
        match field {
            ConfigField::Networks => self.networks = value,
            ConfigField::FiveGhzShare => self.five_ghz_share = value,
            ConfigField::Jitter => self.jitter = value,
            ConfigField::Dropout => self.dropout = value,
            ConfigField::Seed => self.seed = value,
            ConfigField::Description => self.description = value,
        }
    }

    fn to_payload(&self) -> ScenarioConfig {
        ScenarioConfig {
            networks: self.networks.parse().ok(),
            five_ghz_share: self.five_ghz_share.parse().ok(),
            jitter: self.jitter.parse().ok(),
            dropout: self.dropout.parse().ok(),
            seed: self.seed.parse().ok(),
            description: if self.description.trim().is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ScenarioConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    networks: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    five_ghz_share: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    jitter: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dropout: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct VisualizationPayload {
    #[serde(default)]
    tick: u64,
    #[serde(default)]
    network_count: usize,
    #[serde(default)]
    curve_count: usize,
    #[serde(default)]
    frames: Vec<ChartFrame>,
    #[serde(default)]
    notes: Vec<String>,
}

/// Canvas drawing one band's curves inside its axis window.
#[derive(Clone)]
struct ChannelChart {
    frame: ChartFrame,
    offset: i32,
}

impl canvas::Program<Message> for ChannelChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.05),
        );

        let Some(axes) = self.frame.axes.as_ref() else {
            return vec![frame.into_geometry()];
        };

        let margin_left = 36.0;
        let margin_bottom = 20.0;
        let plot_width = (bounds.width - margin_left).max(1.0);
        let plot_height = (bounds.height - margin_bottom).max(1.0);
        let min_x = axes.min_x + self.offset;
        let max_x = axes.max_x + self.offset;
        let span_x = (max_x - min_x).max(1) as f32;
        let span_y = (axes.max_y - axes.min_y).max(1) as f32;

        let to_screen = |x: i32, y: i32| {
            Point::new(
                margin_left + (x - min_x) as f32 / span_x * plot_width,
                plot_height - (y - axes.min_y) as f32 / span_y * plot_height,
            )
        };

        let grid = Stroke::default()
            .with_color(Color::from_rgb(0.25, 0.25, 0.3))
            .with_width(1.0);
        for y in (axes.min_y..=axes.max_y).step_by(10) {
            let label = axes.label.format(y as f64, false);
            let line = Path::line(to_screen(min_x, y), to_screen(max_x, y));
            frame.stroke(&line, grid.clone());
            if !label.is_empty() {
                frame.fill_text(canvas::Text {
                    content: label,
                    position: Point::new(2.0, to_screen(min_x, y).y - 6.0),
                    color: Color::from_rgb(0.7, 0.7, 0.7),
                    size: Pixels(11.0),
                    ..Default::default()
                });
            }
        }
        for x in min_x..=max_x {
            let label = axes.label.format(x as f64, true);
            if label.is_empty() {
                continue;
            }
            let position = to_screen(x, axes.min_y);
            frame.fill_text(canvas::Text {
                content: label,
                position: Point::new(position.x - 6.0, plot_height + 4.0),
                color: Color::from_rgb(0.7, 0.7, 0.7),
                size: Pixels(11.0),
                ..Default::default()
            });
        }

        for series in &self.frame.series {
            if series.style.thickness == 0 || series.points.len() < 2 {
                continue;
            }
            let outline = Path::new(|builder| {
                for (i, point) in series.points.iter().enumerate() {
                    let screen = to_screen(point.x, point.y);
                    if i == 0 {
                        builder.move_to(screen);
                    } else {
                        builder.line_to(screen);
                    }
                }
            });
            if series.style.draw_background {
                frame.fill(&outline, argb_to_color(series.style.color.background));
            }
            frame.stroke(
                &outline,
                Stroke::default()
                    .with_width(series.style.thickness as f32)
                    .with_color(argb_to_color(series.style.color.primary)),
            );
        }

        vec![frame.into_geometry()]
    }
}
