use gloo::timers::callback::Interval;
use minegrid_core::{self as game, StoreSave, StoredOrDefault};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use yew::prelude::*;

use crate::storage::LocalStore;

type Session = game::GameSession<SmallRng, LocalStore>;

const TICK_MILLIS: u32 = 1000;

/// Seed drawn from JavaScript's `Math.random`, 32 bits at a time.
fn js_random_seed() -> u64 {
    let half = || (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (half() << 32) | half()
}

/// What to draw for a cell. Once the game is lost every mine is shown.
fn display_view(status: game::GameStatus, cell: game::Cell) -> game::CellView {
    match cell.view() {
        game::CellView::Hidden | game::CellView::Flagged
            if status == game::GameStatus::Lost && cell.is_mine() =>
        {
            game::CellView::Mine
        }
        view => view,
    }
}

fn cell_classes(view: game::CellView, triggered: bool) -> Classes {
    use game::CellView::*;

    let mut class = classes!(
        "cell",
        match view {
            Hidden => classes!(),
            Flagged => classes!("flag"),
            Revealed(count) => classes!("open", format!("num-{}", count)),
            Mine => classes!("open", "mine"),
        }
    );
    if triggered {
        class.push("oops");
    }
    class
}

fn cell_label(view: game::CellView) -> String {
    use game::CellView::*;

    match view {
        Hidden | Revealed(0) => String::new(),
        Flagged => "🚩".to_string(),
        Revealed(count) => count.to_string(),
        Mine => "💣".to_string(),
    }
}

const fn status_class(status: game::GameStatus) -> &'static str {
    use game::GameStatus::*;
    match status {
        Playing => "in-progress",
        Won => "win",
        Lost => "lose",
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Reveal(game::Coord2),
    ToggleFlag(game::Coord2),
    SelectDifficulty(game::Difficulty),
    Restart,
    Tick(game::TickToken),
}

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[prop_or_default]
    pub seed: Option<u64>,
    /// Override the saved difficulty
    #[prop_or_default]
    pub difficulty: Option<game::Difficulty>,
}

pub(crate) struct GameView {
    session: Session,
    ticker: Option<Interval>,
}

impl GameView {
    /// Starts a fresh interval for the current grid. Replacing the old `Interval` drops and thereby cancels it.
    fn schedule_ticks(&mut self, ctx: &Context<Self>) {
        self.ticker = self.session.tick_token().map(|token| {
            let link = ctx.link().clone();
            Interval::new(TICK_MILLIS, move || link.send_message(Msg::Tick(token)))
        });
    }

    fn save_settings(&self) {
        if let Err(err) = self.session.settings().save_to(&mut LocalStore) {
            log::error!("Could not save settings to local storage: {}", err);
        }
    }

    fn view_cell(&self, ctx: &Context<Self>, coords: game::Coord2) -> Html {
        let status = self.session.status();
        let view = display_view(status, self.session.grid()[coords]);
        let triggered = self.session.engine().triggered_mine() == Some(coords);
        let class = cell_classes(view, triggered);

        let onclick = ctx.link().callback(move |_| Msg::Reveal(coords));
        let oncontextmenu = ctx.link().callback(move |e: MouseEvent| {
            e.prevent_default();
            Msg::ToggleFlag(coords)
        });

        html! {
            <td {class} {onclick} {oncontextmenu}>{cell_label(view)}</td>
        }
    }

    fn view_leaderboard(&self) -> Html {
        let times = self.session.leaderboard().times();
        html! {
            <table class="leaderboard">
                <thead>
                    <tr><th>{"#"}</th><th>{"Time (mm:ss)"}</th></tr>
                </thead>
                <tbody>
                    {
                        for times.iter().enumerate().map(|(rank, &secs)| html! {
                            <tr>
                                <td>{rank + 1}</td>
                                <td>{game::format_clock(secs)}</td>
                            </tr>
                        })
                    }
                </tbody>
            </table>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let mut settings = game::Settings::stored_or_default(&LocalStore);
        if let Some(difficulty) = props.difficulty {
            settings.difficulty = difficulty;
        }
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("Creating {} game with seed {}", settings.difficulty, seed);

        let mut view = Self {
            session: game::GameSession::new(settings, SmallRng::seed_from_u64(seed), LocalStore),
            ticker: None,
        };
        view.schedule_ticks(ctx);
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            Reveal(coords) => {
                log::debug!("reveal cell: {:?}", coords);
                self.session.reveal(coords).has_update()
            }
            ToggleFlag(coords) => {
                log::debug!("flag cell: {:?}", coords);
                self.session.toggle_flag(coords).has_update()
            }
            SelectDifficulty(difficulty) => {
                self.session.regenerate(difficulty);
                self.save_settings();
                self.schedule_ticks(ctx);
                true
            }
            Restart => {
                self.session.restart();
                self.schedule_ticks(ctx);
                true
            }
            Tick(token) => self.session.tick(token),
        };

        if self.session.status().is_finished() && self.ticker.take().is_some() {
            log::debug!("Timer cancelled at {}s", self.session.elapsed_secs());
        }
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let size = self.session.grid().size();
        let status = self.session.status();
        let current = self.session.difficulty();
        let mines_left = self.session.grid().mines_left();
        let clock = self.session.timer().display();

        let cb_restart = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::Restart
        });

        html! {
            <div class="minegrid" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <menu>
                    {
                        for game::Difficulty::ALL.into_iter().map(|difficulty| {
                            let onclick = ctx.link().callback(move |_| Msg::SelectDifficulty(difficulty));
                            let class = classes!((difficulty == current).then_some("selected"));
                            html! {
                                <li><button {class} {onclick}>{difficulty.name()}</button></li>
                            }
                        })
                    }
                </menu>
                <nav>
                    <aside>{mines_left}</aside>
                    <span><button class={classes!(status_class(status))} onclick={cb_restart}>{"Restart"}</button></span>
                    <aside>{clock}</aside>
                </nav>
                <table class={classes!("board", status.is_playing().then_some("playable"))}>
                    {
                        for (0..size).map(|row| html! {
                            <tr>
                                { for (0..size).map(|col| self.view_cell(ctx, (row, col))) }
                            </tr>
                        })
                    }
                </table>
                {
                    match status {
                        game::GameStatus::Won => html! { <p class="result">{"You Win!"}</p> },
                        game::GameStatus::Lost => html! { <p class="result">{"Game Over"}</p> },
                        game::GameStatus::Playing => html! {},
                    }
                }
                {self.view_leaderboard()}
            </div>
        }
    }
}
