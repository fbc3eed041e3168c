mod callback_data;
mod delivery;
mod format;
mod handlers;
mod state;
mod texts;

use env::Env;
use eyre::Result;
use gate::Gate;
use handlers::callback::callback_handler;
use handlers::command::{command_handler, Command};
use handlers::message::message_handler;
use state::StateHolder;
use teloxide::{
    dispatching::{HandlerExt as _, UpdateFilterExt as _},
    dptree,
    prelude::{Dispatcher, Requester as _},
    types::{CallbackQuery, Message, Update},
    utils::command::BotCommands as _,
    Bot,
};

pub use delivery::TgDelivery;

pub async fn start_bot(bot: Bot, gate: Gate, env: Env) -> Result<()> {
    bot.set_my_commands(Command::bot_commands()).await?;

    let state = StateHolder::default();

    let cmd_gate = gate.clone();
    let cmd_env = env.clone();
    let msg_gate = gate.clone();
    let msg_state = state.clone();

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                    command_handler(bot, msg, cmd, cmd_gate.clone(), cmd_env.clone())
                }),
        )
        .branch(Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
            message_handler(bot, msg, msg_gate.clone(), msg_state.clone())
        }))
        .branch(
            Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
                callback_handler(bot, q, gate.clone())
            }),
        );

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    Ok(())
}
