mod balance_calculator_tests;
