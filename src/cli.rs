// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

pub fn build_cli() -> Command {
    Command::new("gagyebu")
        .about("Personal finance ledger with statistics, goal simulation, and Korean tax estimation")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD or 'YYYY-MM-DD HH:MM:SS'"))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true).help("Positive decimal magnitude"))
                        .arg(Arg::new("type").long("type").required(true).help("income|expense"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("note").long("note"))
                        .arg(Arg::new("source").long("source")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("type").long("type").help("income|expense"))
                        .arg(Arg::new("status").long("status").help("completed|cancelled"))
                        .arg(Arg::new("limit").long("limit").value_parser(value_parser!(usize))),
                ))
                .subcommand(
                    Command::new("update")
                        .about("Edit a transaction")
                        .arg(id_arg())
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(Command::new("cancel").about("Mark a transaction cancelled").arg(id_arg()))
                .subcommand(Command::new("rm").about("Delete a transaction").arg(id_arg())),
        )
        .subcommand(
            Command::new("regular")
                .about("Manage regular (recurring) transactions")
                .subcommand(
                    Command::new("add")
                        .about("Add a regular transaction template")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("type").long("type").required(true).help("income|expense"))
                        .arg(Arg::new("frequency").long("frequency").default_value("monthly").help("monthly|yearly|weekly"))
                        .arg(Arg::new("day").long("day").value_parser(value_parser!(u32).range(1..=31)).help("Day of month trigger"))
                        .arg(Arg::new("start").long("start").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("end").long("end").help("YYYY-MM-DD"))
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(json_flags(Command::new("list").about("List regular transactions")))
                .subcommand(Command::new("rm").about("Delete a regular transaction").arg(id_arg())),
        )
        .subcommand(
            Command::new("plan")
                .about("Manage monthly budget plans")
                .subcommand(
                    Command::new("set")
                        .about("Create or update a plan for (year, month, category)")
                        .arg(Arg::new("year").long("year").required(true).value_parser(value_parser!(i32).range(2000..=2100)))
                        .arg(Arg::new("month").long("month").required(true).value_parser(value_parser!(u32).range(1..=12)))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List budget plans")
                        .arg(Arg::new("year").long("year").value_parser(value_parser!(i32).range(2000..=2100)))
                        .arg(Arg::new("month").long("month").value_parser(value_parser!(u32).range(1..=12))),
                ))
                .subcommand(Command::new("rm").about("Delete a budget plan").arg(id_arg())),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage asset goals")
                .subcommand(
                    Command::new("add")
                        .about("Create an asset goal")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("amount").long("amount").required(true).help("Target amount"))
                        .arg(Arg::new("date").long("date").required(true).help("Target date YYYY-MM-DD"))
                        .arg(Arg::new("current").long("current").default_value("0").help("Starting amount"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(Command::new("list").about("List asset goals")))
                .subcommand(json_flags(
                    Command::new("analyze")
                        .about("Project the savings trajectory against a goal")
                        .arg(id_arg()),
                ))
                .subcommand(Command::new("rm").about("Delete an asset goal").arg(id_arg())),
        )
        .subcommand(
            Command::new("report")
                .about("Statistics over the ledger")
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Monthly income/expense/net summary")
                        .arg(Arg::new("year").long("year").required(true).value_parser(value_parser!(i32).range(2000..=2100)))
                        .arg(Arg::new("month").long("month").required(true).value_parser(value_parser!(u32).range(1..=12))),
                ))
                .subcommand(json_flags(
                    Command::new("category")
                        .about("Category breakdown with percentage share")
                        .arg(Arg::new("year").long("year").required(true).value_parser(value_parser!(i32).range(2000..=2100)))
                        .arg(Arg::new("month").long("month").required(true).value_parser(value_parser!(u32).range(1..=12)))
                        .arg(Arg::new("type").long("type").required(true).help("income|expense")),
                ))
                .subcommand(json_flags(
                    Command::new("trend")
                        .about("Month-over-month trend, newest first")
                        .arg(Arg::new("months").long("months").default_value("12").value_parser(clap::builder::RangedU64ValueParser::<usize>::new().range(1..=60)).help("1-60")),
                ))
                .subcommand(json_flags(
                    Command::new("category-range")
                        .about("Category totals over an arbitrary date range")
                        .arg(Arg::new("type").long("type").help("income|expense"))
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD")),
                ))
                .subcommand(json_flags(
                    Command::new("range")
                        .about("Overall totals over an arbitrary date range")
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD")),
                )),
        )
        .subcommand(
            Command::new("tax")
                .about("Estimate Korean taxes and net pay")
                .subcommand(json_flags(
                    Command::new("salary")
                        .about("Payroll withholding estimate from gross monthly salary")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("dependents").long("dependents").default_value("1").value_parser(value_parser!(u32).range(1..))),
                ))
                .subcommand(json_flags(
                    Command::new("financial")
                        .about("Flat 15.4% financial-income tax estimate")
                        .arg(Arg::new("amount").long("amount").required(true)),
                )),
        )
        .subcommand(
            Command::new("import")
                .about("Import transactions from files")
                .subcommand(
                    Command::new("kakaopay")
                        .about("Import a KakaoPay CSV export")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export ledger data")
                .subcommand(
                    Command::new("transactions")
                        .about("Dump all transactions")
                        .arg(Arg::new("format").long("format").default_value("csv").help("csv|json"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("sync")
                .about("Bank transaction synchronization (stub)")
                .subcommand(Command::new("status").about("Show bank API configuration state"))
                .subcommand(
                    Command::new("bank")
                        .about("Pull recent transactions for an account")
                        .arg(Arg::new("account").long("account").required(true).help("fintech_use_num"))
                        .arg(Arg::new("days").long("days").default_value("30").value_parser(value_parser!(i64).range(1..))),
                ),
        )
}
